// Platform-independent description of slash commands.
//
// The Discord layer converts these to and from serenity builders/models, the
// sync planner only ever sees these types.

/// What kind of value a command option takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Number,
    Attachment,
    /// A remote option type this bot never declares (sub-commands and such).
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceValue {
    String(String),
    Integer(i32),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionChoice {
    pub name: String,
    pub value: ChoiceValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    pub kind: OptionKind,
    pub required: bool,
    pub choices: Vec<OptionChoice>,
}

impl CommandOption {
    pub fn new(kind: OptionKind, name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            required: false,
            choices: Vec::new(),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[allow(dead_code)] // None of the shipped commands use this yet
    pub fn choice(mut self, name: &str, value: ChoiceValue) -> Self {
        self.choices.push(OptionChoice {
            name: name.to_string(),
            value,
        });
        self
    }
}

/// A command as this bot wants it registered.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
    /// Remove the command from the platform on the next sync.
    pub deleted: bool,
    /// Only the configured developer may run it.
    pub dev_only: bool,
    /// Only usable inside the configured test guild.
    pub test_only: bool,
}

impl CommandDefinition {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            options: Vec::new(),
            deleted: false,
            dev_only: false,
            test_only: false,
        }
    }

    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    #[allow(dead_code)] // None of the shipped commands use this yet
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    #[allow(dead_code)] // None of the shipped commands use this yet
    pub fn dev_only(mut self) -> Self {
        self.dev_only = true;
        self
    }

    #[allow(dead_code)] // None of the shipped commands use this yet
    pub fn test_only(mut self) -> Self {
        self.test_only = true;
        self
    }
}

/// A command as it is currently registered on the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCommand {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
}
