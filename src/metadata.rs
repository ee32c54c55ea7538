//! Project metadata entered by the user.
//!
//! Each field is checked against a fixed pattern and asked again until it
//! matches. The pretty name is never asked for; it is derived from the
//! accepted project name.

use std::fmt;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};
use crate::output;
use crate::prompt::Prompter;

/// npm package name: optional `@scope/` then lowercase name characters.
pub const NAME_PATTERN: &str = r"^(?:@[a-z0-9\-*~][a-z0-9\-*._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$";
/// Letters, digits and spaces.
pub const TEXT_PATTERN: &str = r"^[A-Za-z0-9 ]+$";
/// Reverse-domain identifier with at least two segments.
pub const ID_PATTERN: &str = r"^[a-z]+(\.[a-z]+)+$";

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(NAME_PATTERN).unwrap());
static TEXT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(TEXT_PATTERN).unwrap());
static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(ID_PATTERN).unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub name: String,
    pub pretty_name: String,
    pub description: String,
    pub author: String,
    pub id: String,
}

impl ProjectMetadata {
    /// Validates every raw field and derives the pretty name.
    pub fn new(name: &str, description: &str, author: &str, id: &str) -> Result<Self> {
        Field::Name.validate(name)?;
        Field::Description.validate(description)?;
        Field::Author.validate(author)?;
        Field::Id.validate(id)?;

        Ok(Self {
            name: name.to_string(),
            pretty_name: pretty_name(name),
            description: description.to_string(),
            author: author.to_string(),
            id: id.to_string(),
        })
    }
}

/// The four fields asked for, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Author,
    Id,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Description, Field::Author, Field::Id];

    pub fn question(self) -> &'static str {
        match self {
            Field::Name => "What would you like to name your project?",
            Field::Description => "Take a second to describe your project.",
            Field::Author => "What is your name?",
            Field::Id => "What is your project ID? (com.company.app)",
        }
    }

    pub fn pattern(self) -> &'static str {
        match self {
            Field::Name => NAME_PATTERN,
            Field::Description | Field::Author => TEXT_PATTERN,
            Field::Id => ID_PATTERN,
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Field::Name => &*NAME_RE,
            Field::Description | Field::Author => &*TEXT_RE,
            Field::Id => &*ID_RE,
        }
    }

    /// # Errors
    /// * `Error::ValidationError` if `value` does not match the field's pattern
    pub fn validate(self, value: &str) -> Result<()> {
        if self.regex().is_match(value) {
            Ok(())
        } else {
            Err(Error::ValidationError(format!("'{}' is not a valid {}", value, self)))
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "project name",
            Field::Description => "project description",
            Field::Author => "author name",
            Field::Id => "project ID",
        };
        f.write_str(label)
    }
}

/// Turns `my-cool-app` into `My Cool App`: dashes become spaces and the
/// first letter of every word is upper-cased. Any character other than a
/// letter, a digit, `.`, `_` or `'` starts a new word, so `@scope/my-app`
/// becomes `@Scope/My App`.
pub fn pretty_name(name: &str) -> String {
    let mut pretty = String::with_capacity(name.len());
    let mut word_start = true;
    for c in name.chars() {
        let c = if c == '-' { ' ' } else { c };
        if c.is_alphanumeric() {
            if word_start {
                pretty.extend(c.to_uppercase());
            } else {
                pretty.push(c);
            }
            word_start = false;
        } else {
            pretty.push(c);
            if !matches!(c, '.' | '_' | '\'') {
                word_start = true;
            }
        }
    }
    pretty
}

/// Asks for `field` until the answer matches its pattern.
pub fn ask_field(prompter: &mut dyn Prompter, field: Field) -> Result<String> {
    loop {
        let answer = prompter.ask(field.question())?;
        match field.validate(&answer) {
            Ok(()) => {
                debug!("Accepted {}: '{}'", field, answer);
                return Ok(answer);
            }
            Err(_) => {
                output::error(&format!(
                    "Sorry, that's not a valid {}. It must match this regex: ",
                    field
                ));
                output::help(field.pattern());
            }
        }
    }
}

/// Collects all project metadata from `prompter`.
pub fn collect(prompter: &mut dyn Prompter) -> Result<ProjectMetadata> {
    let name = ask_field(prompter, Field::Name)?;
    let description = ask_field(prompter, Field::Description)?;
    let author = ask_field(prompter, Field::Author)?;
    let id = ask_field(prompter, Field::Id)?;

    Ok(ProjectMetadata {
        pretty_name: pretty_name(&name),
        name,
        description,
        author,
        id,
    })
}
