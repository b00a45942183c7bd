use super::command_models::{CommandDefinition, CommandOption, OptionChoice, RemoteCommand};

/// One step needed to bring the remote command list in line with the local one.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncAction {
    Create { definition: CommandDefinition },
    Edit { id: u64, definition: CommandDefinition },
    Delete { id: u64, name: String },
    Unchanged { name: String },
}

impl SyncAction {
    pub fn command_name(&self) -> &str {
        match self {
            SyncAction::Create { definition } | SyncAction::Edit { definition, .. } => {
                &definition.name
            }
            SyncAction::Delete { name, .. } | SyncAction::Unchanged { name } => name,
        }
    }
}

/// Returns true when the registered command already looks like the local one.
///
/// Names are assumed equal (the caller pairs commands by name). Options and
/// choices are matched by name so ordering differences don't force an edit.
pub fn commands_match(remote: &RemoteCommand, local: &CommandDefinition) -> bool {
    remote.description == local.description
        && remote.options.len() == local.options.len()
        && !options_differ(&remote.options, &local.options)
}

fn options_differ(remote: &[CommandOption], local: &[CommandOption]) -> bool {
    local.iter().any(|local_option| {
        let Some(remote_option) = remote.iter().find(|o| o.name == local_option.name) else {
            return true;
        };

        local_option.description != remote_option.description
            || local_option.kind != remote_option.kind
            || local_option.required != remote_option.required
            || local_option.choices.len() != remote_option.choices.len()
            || choices_differ(&remote_option.choices, &local_option.choices)
    })
}

fn choices_differ(remote: &[OptionChoice], local: &[OptionChoice]) -> bool {
    local.iter().any(|local_choice| {
        match remote.iter().find(|c| c.name == local_choice.name) {
            Some(remote_choice) => remote_choice.value != local_choice.value,
            None => true,
        }
    })
}

/// Work out which create/edit/delete calls are needed, in local catalog order.
///
/// Remote commands that have no local definition at all are left untouched;
/// retiring a command is done by keeping its definition and marking it deleted.
pub fn plan_sync(local: &[CommandDefinition], remote: &[RemoteCommand]) -> Vec<SyncAction> {
    let mut actions = Vec::new();

    for definition in local {
        let existing = remote.iter().find(|c| c.name == definition.name);

        match existing {
            Some(existing) if definition.deleted => actions.push(SyncAction::Delete {
                id: existing.id,
                name: existing.name.clone(),
            }),
            Some(existing) if !commands_match(existing, definition) => {
                actions.push(SyncAction::Edit {
                    id: existing.id,
                    definition: definition.clone(),
                })
            }
            Some(existing) => actions.push(SyncAction::Unchanged {
                name: existing.name.clone(),
            }),
            None if definition.deleted => {}
            None => actions.push(SyncAction::Create {
                definition: definition.clone(),
            }),
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::{ChoiceValue, OptionKind};

    fn remote_from(id: u64, local: &CommandDefinition) -> RemoteCommand {
        RemoteCommand {
            id,
            name: local.name.clone(),
            description: local.description.clone(),
            options: local.options.clone(),
        }
    }

    fn search_command() -> CommandDefinition {
        CommandDefinition::new("sakugabooru", "search sakugabooru").option(
            CommandOption::new(OptionKind::String, "tags", "search tags")
                .required(true)
                .choice("lum", ChoiceValue::String("lum".to_string()))
                .choice("ataru", ChoiceValue::String("ataru".to_string())),
        )
    }

    #[test]
    fn test_identical_commands_match() {
        let local = search_command();
        let remote = remote_from(1, &local);
        assert!(commands_match(&remote, &local));
    }

    #[test]
    fn test_description_change_is_detected() {
        let local = CommandDefinition::new("ping", "ping the bot");
        let mut remote = remote_from(1, &local);
        remote.description = "old text".to_string();
        assert!(!commands_match(&remote, &local));
    }

    #[test]
    fn test_option_changes_are_detected() {
        let local = search_command();

        let mut missing = remote_from(1, &local);
        missing.options.clear();
        assert!(!commands_match(&missing, &local));

        let mut not_required = remote_from(1, &local);
        not_required.options[0].required = false;
        assert!(!commands_match(&not_required, &local));

        let mut other_kind = remote_from(1, &local);
        other_kind.options[0].kind = OptionKind::Integer;
        assert!(!commands_match(&other_kind, &local));

        let mut renamed = remote_from(1, &local);
        renamed.options[0].name = "query".to_string();
        assert!(!commands_match(&renamed, &local));
    }

    #[test]
    fn test_choice_changes_are_detected() {
        let local = search_command();

        let mut changed_value = remote_from(1, &local);
        changed_value.options[0].choices[1].value = ChoiceValue::String("shinobu".to_string());
        assert!(!commands_match(&changed_value, &local));

        let mut dropped = remote_from(1, &local);
        dropped.options[0].choices.pop();
        assert!(!commands_match(&dropped, &local));
    }

    #[test]
    fn test_choice_order_does_not_matter() {
        let local = search_command();
        let mut remote = remote_from(1, &local);
        remote.options[0].choices.reverse();
        assert!(commands_match(&remote, &local));
    }

    #[test]
    fn test_plan_sync_covers_every_case() {
        let ping = CommandDefinition::new("ping", "ping the bot");
        let lum = CommandDefinition::new("lum", "want to see lum?");
        let search = search_command();
        let retired = CommandDefinition::new("old", "gone soon").deleted();
        let never_registered = CommandDefinition::new("ghost", "never existed").deleted();

        let mut stale_lum = remote_from(20, &lum);
        stale_lum.description = "outdated".to_string();

        let remote = vec![
            remote_from(10, &ping),
            stale_lum,
            remote_from(30, &retired),
            RemoteCommand {
                id: 40,
                name: "unmanaged".to_string(),
                description: "registered elsewhere".to_string(),
                options: Vec::new(),
            },
        ];

        let local = vec![ping, lum.clone(), search.clone(), retired, never_registered];
        let actions = plan_sync(&local, &remote);

        assert_eq!(
            actions,
            vec![
                SyncAction::Unchanged {
                    name: "ping".to_string()
                },
                SyncAction::Edit {
                    id: 20,
                    definition: lum
                },
                SyncAction::Create { definition: search },
                SyncAction::Delete {
                    id: 30,
                    name: "old".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_plan_sync_with_nothing_registered() {
        let local = vec![
            CommandDefinition::new("ping", "ping the bot"),
            CommandDefinition::new("lum", "want to see lum?"),
        ];
        let actions = plan_sync(&local, &[]);

        assert_eq!(actions.len(), 2);
        assert!(actions
            .iter()
            .all(|a| matches!(a, SyncAction::Create { .. })));
        assert_eq!(actions[1].command_name(), "lum");
    }
}
