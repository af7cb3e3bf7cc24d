//! Raw input acquisition

use super::secret::Secret;
use super::validate::FieldKind;
use crate::project::StackVariant;
use std::collections::HashMap;
use std::io;

/// Supplies the raw string for one field.
///
/// Implementations block until the value is available. An `Err` means the
/// input could not be obtained at all (closed terminal, user cancelled).
pub trait InputSource {
    fn ask(&mut self, field: FieldKind, variant: StackVariant) -> io::Result<String>;
}

/// Unvalidated answers, collected once at the start of a run
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    pub project_name: String,
    pub database_name: Option<String>,
    pub db_user: String,
    pub db_password: Secret,
}

impl RawInput {
    /// Ask `source` for every field `variant` requires, in prompt order.
    ///
    /// The database name is only requested when the variant requires one.
    pub fn collect(source: &mut impl InputSource, variant: StackVariant) -> io::Result<Self> {
        let required = variant.required_fields();
        let mut input = RawInput::default();

        for field in FieldKind::ALL {
            if !required.contains(&field) {
                continue;
            }
            let value = source.ask(field, variant)?;
            match field {
                FieldKind::ProjectName => input.project_name = value,
                FieldKind::DatabaseName => input.database_name = Some(value),
                FieldKind::DbUser => input.db_user = value,
                FieldKind::DbPassword => input.db_password = Secret::new(value),
            }
        }

        Ok(input)
    }
}

/// Fixed answers, for scripted runs and tests
#[derive(Debug, Clone, Default)]
pub struct PresetInput {
    answers: HashMap<FieldKind, String>,
}

impl PresetInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FieldKind, value: impl Into<String>) -> Self {
        self.answers.insert(field, value.into());
        self
    }
}

impl InputSource for PresetInput {
    fn ask(&mut self, field: FieldKind, _variant: StackVariant) -> io::Result<String> {
        self.answers.get(&field).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no value supplied for {}", field),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the order fields were requested in
    struct Recording {
        asked: Vec<FieldKind>,
    }

    impl InputSource for Recording {
        fn ask(&mut self, field: FieldKind, _variant: StackVariant) -> io::Result<String> {
            self.asked.push(field);
            Ok(format!("{:?}", field).to_lowercase())
        }
    }

    #[test]
    fn test_collect_asks_in_prompt_order() {
        let mut source = Recording { asked: Vec::new() };
        let input = RawInput::collect(&mut source, StackVariant::RelationalWithCodegen).unwrap();

        assert_eq!(
            source.asked,
            vec![
                FieldKind::ProjectName,
                FieldKind::DatabaseName,
                FieldKind::DbUser,
                FieldKind::DbPassword,
            ]
        );
        assert_eq!(input.database_name.as_deref(), Some("databasename"));
    }

    #[test]
    fn test_collect_skips_database_name_when_not_required() {
        let mut source = Recording { asked: Vec::new() };
        let input = RawInput::collect(&mut source, StackVariant::GraphWithMigrations).unwrap();

        assert!(!source.asked.contains(&FieldKind::DatabaseName));
        assert!(input.database_name.is_none());
    }

    #[test]
    fn test_preset_missing_answer_is_eof() {
        let mut source = PresetInput::new().with(FieldKind::ProjectName, "app");
        let err = RawInput::collect(&mut source, StackVariant::GraphWithMigrations).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_raw_input_debug_hides_password() {
        let input = RawInput {
            db_password: Secret::new("secret"),
            ..RawInput::default()
        };
        assert!(!format!("{:?}", input).contains("secret"));
    }
}
