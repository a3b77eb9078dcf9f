use crate::ReadError;

#[allow(async_fn_in_trait)]
pub trait QuoteService {
    /// A random quote, or the fallback quote if none could be fetched.
    async fn get_quote(&self) -> Quote;
}

#[allow(async_fn_in_trait)]
pub trait QuoteRepository {
    async fn read_random_quote(&self) -> Result<Quote, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub content: String,
    pub author: String,
}

impl Quote {
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            content: String::from("The body achieves what the mind believes."),
            author: String::from("Anonymous"),
        }
    }
}
