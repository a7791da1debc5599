//! Entry form validation
//!
//! Field-level validation for the add-entry form. All failing fields are
//! reported together so the form can mark every offending input at once
//! instead of surfacing one error per submit attempt.

use chrono::NaiveDate;

use crate::data::{EntryDraft, EntryKind};

/// Longest accepted category label.
const MAX_CATEGORY_LEN: usize = 40;

/// Category suggestions offered by the form for expense entries.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Other",
];

/// Category suggestions offered by the form for income entries.
pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investment", "Business", "Other"];

/// Returns the category suggestions for an entry kind.
pub fn category_options(kind: EntryKind) -> &'static [&'static str] {
    match kind {
        EntryKind::Income => INCOME_CATEGORIES,
        EntryKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// A validation failure tied to a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field ("amount", "category", "date")
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validates raw form input and produces a draft entry on success.
///
/// On failure every offending field is reported, in field order.
pub fn validate_entry_form(
    kind: EntryKind,
    amount: &str,
    category: &str,
    date: &str,
) -> Result<EntryDraft, Vec<FieldError>> {
    let mut errors = Vec::new();

    let amount_value = if amount.trim().is_empty() {
        errors.push(FieldError::new("amount", "Amount is required"));
        None
    } else {
        match amount.trim().parse::<f64>() {
            Ok(value) if value > 0.0 => Some(value),
            Ok(_) => {
                errors.push(FieldError::new("amount", "Amount must be greater than 0"));
                None
            }
            Err(_) => {
                errors.push(FieldError::new("amount", "Amount must be a number"));
                None
            }
        }
    };

    let category = category.trim();
    if category.is_empty() {
        errors.push(FieldError::new("category", "Category is required"));
    } else if category.len() > MAX_CATEGORY_LEN {
        errors.push(FieldError::new(
            "category",
            format!("Category must be no more than {} characters", MAX_CATEGORY_LEN),
        ));
    }

    let date_value = if date.trim().is_empty() {
        errors.push(FieldError::new("date", "Date is required"));
        None
    } else {
        match date.trim().parse::<NaiveDate>() {
            Ok(value) => Some(value),
            Err(_) => {
                errors.push(FieldError::new("date", "Date must be YYYY-MM-DD"));
                None
            }
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // An empty error list guarantees both values parsed
    Ok(EntryDraft {
        kind,
        amount: amount_value.unwrap_or_default(),
        category: category.to_string(),
        date: date_value.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_produces_a_draft() {
        let draft = validate_entry_form(EntryKind::Income, "100", "Salary", "2024-02-01")
            .expect("input should validate");

        assert_eq!(draft.kind, EntryKind::Income);
        assert!((draft.amount - 100.0).abs() < 0.001);
        assert_eq!(draft.category, "Salary");
        assert_eq!(draft.date, "2024-02-01".parse().unwrap());
    }

    #[test]
    fn test_input_is_trimmed() {
        let draft = validate_entry_form(EntryKind::Expense, " 42.50 ", "  Travel ", " 2024-03-05 ")
            .expect("padded input should validate");
        assert!((draft.amount - 42.5).abs() < 0.001);
        assert_eq!(draft.category, "Travel");
    }

    #[test]
    fn test_missing_amount_is_reported() {
        let errors = validate_entry_form(EntryKind::Expense, "", "Travel", "2024-03-05")
            .expect_err("empty amount should fail");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "amount");
        assert_eq!(errors[0].message, "Amount is required");
    }

    #[test]
    fn test_zero_amount_is_rejected() {
        let errors = validate_entry_form(EntryKind::Expense, "0", "Travel", "2024-03-05")
            .expect_err("zero amount should fail");
        assert_eq!(errors[0].message, "Amount must be greater than 0");
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let errors = validate_entry_form(EntryKind::Expense, "abc", "Travel", "2024-03-05")
            .expect_err("non-numeric amount should fail");
        assert_eq!(errors[0].message, "Amount must be a number");
    }

    #[test]
    fn test_missing_category_is_reported() {
        let errors = validate_entry_form(EntryKind::Expense, "10", "  ", "2024-03-05")
            .expect_err("blank category should fail");
        assert_eq!(errors[0].field, "category");
    }

    #[test]
    fn test_overlong_category_is_rejected() {
        let long = "x".repeat(MAX_CATEGORY_LEN + 1);
        let errors = validate_entry_form(EntryKind::Expense, "10", &long, "2024-03-05")
            .expect_err("overlong category should fail");
        assert_eq!(errors[0].field, "category");
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let errors = validate_entry_form(EntryKind::Expense, "10", "Travel", "03/05/2024")
            .expect_err("non-ISO date should fail");
        assert_eq!(errors[0].field, "date");
        assert_eq!(errors[0].message, "Date must be YYYY-MM-DD");
    }

    #[test]
    fn test_all_failing_fields_are_reported_together() {
        let errors = validate_entry_form(EntryKind::Expense, "", "", "")
            .expect_err("everything blank should fail");
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["amount", "category", "date"]);
    }

    #[test]
    fn test_category_options_differ_by_kind() {
        assert!(category_options(EntryKind::Income).contains(&"Salary"));
        assert!(!category_options(EntryKind::Expense).contains(&"Salary"));
        assert!(category_options(EntryKind::Expense).contains(&"Food & Dining"));
    }
}
