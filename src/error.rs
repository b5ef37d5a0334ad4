use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckoutError>;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("exchange rate provider unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("malformed exchange rate response: {0}")]
    MalformedResponse(String),

    #[error("database error: {0}")]
    Persistence(#[from] sqlx::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("description is empty")]
    EmptyDescription,
    #[error("description is longer than {} characters", crate::service::MAX_DESCRIPTION_LEN)]
    DescriptionTooLong,
    #[error("transaction value must be greater than zero")]
    NonPositiveValue,
    #[error("filter `{0}` is required")]
    MissingFilter(&'static str),
    #[error("filter `{name}` has an invalid value `{value}`")]
    InvalidFilter { name: &'static str, value: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum NotFoundError {
    #[error("no exchange rate record within window")]
    RateRecord,
    #[error("transaction {0} not found")]
    Transaction(i64),
}

impl CheckoutError {
    /// Message table key for this error.
    pub fn key(&self) -> &'static str {
        match self {
            CheckoutError::Validation(e) => match e {
                ValidationError::EmptyDescription => "error.description.empty",
                ValidationError::DescriptionTooLong => "error.description.too.long",
                ValidationError::NonPositiveValue => "error.value.not.positive",
                ValidationError::MissingFilter(_) => "error.transaction.date.required",
                ValidationError::InvalidFilter { .. } => "error.transaction.date.invalid",
            },
            CheckoutError::NotFound(NotFoundError::RateRecord) => "error.not.found.value.record",
            CheckoutError::NotFound(NotFoundError::Transaction(_)) => "error.transaction.not.found",
            CheckoutError::UpstreamUnavailable(_) => "error.rates.unavailable",
            CheckoutError::MalformedResponse(_) => "error.rates.malformed",
            CheckoutError::Persistence(_) => "error.database",
        }
    }

    /// Text interpolated after the message template, if any.
    pub fn detail(&self) -> Option<String> {
        match self {
            CheckoutError::Validation(ValidationError::InvalidFilter { value, .. }) => {
                Some(value.clone())
            }
            CheckoutError::Validation(_) => None,
            CheckoutError::NotFound(NotFoundError::Transaction(id)) => Some(id.to_string()),
            CheckoutError::NotFound(NotFoundError::RateRecord) => None,
            CheckoutError::UpstreamUnavailable(msg) | CheckoutError::MalformedResponse(msg) => {
                Some(msg.clone())
            }
            CheckoutError::Persistence(err) => Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_the_variant() {
        let err: CheckoutError = ValidationError::EmptyDescription.into();
        assert_eq!(err.key(), "error.description.empty");
        assert_eq!(err.detail(), None);

        let err: CheckoutError = NotFoundError::RateRecord.into();
        assert_eq!(err.key(), "error.not.found.value.record");
        assert_eq!(err.to_string(), "no exchange rate record within window");

        let err = CheckoutError::UpstreamUnavailable("status 500".into());
        assert_eq!(err.key(), "error.rates.unavailable");
        assert_eq!(err.detail().as_deref(), Some("status 500"));

        let err: CheckoutError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.key(), "error.database");
        assert!(err.detail().is_some());
    }
}
