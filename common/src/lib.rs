use validator::ValidationErrors;

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3, message = "name too short"))]
        name: String,
    }

    #[test]
    fn joins_messages() {
        let err = Probe {
            name: "ab".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(format_validation_errors(&err), "name too short");
    }
}
