use crate::error::DomainError;

/// Maximum title length, in characters.
pub const TITLE_MAX_LEN: usize = 500;

/// Post entity - represents a blog post.
///
/// Fields are private. The only way to change a stored post is [`Post::update`],
/// which replaces title and content together and leaves `id` and `author` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: Option<i64>,
    title: String,
    content: String,
    author: Option<String>,
}

impl Post {
    /// Create a new, not yet persisted post.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: Option<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let content = content.into();
        validate(&title, &content)?;

        Ok(Self {
            id: None,
            title,
            content,
            author,
        })
    }

    /// Rehydrate a post read back from storage.
    ///
    /// Only repository implementations should call this; the id must be the
    /// one storage assigned on insert.
    pub fn from_storage(id: i64, title: String, content: String, author: Option<String>) -> Self {
        Self {
            id: Some(id),
            title,
            content,
            author,
        }
    }

    /// Replace title and content. On error the post is left untouched.
    pub fn update(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        let title = title.into();
        let content = content.into();
        validate(&title, &content)?;

        self.title = title;
        self.content = content;
        Ok(())
    }

    /// Storage-assigned id, `None` until the post has been inserted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

fn validate(title: &str, content: &str) -> Result<(), DomainError> {
    if title.is_empty() {
        return Err(DomainError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "title must be at most {TITLE_MAX_LEN} characters"
        )));
    }
    if content.is_empty() {
        return Err(DomainError::Validation(
            "content must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_has_no_id() {
        let post = Post::new("Hello", "World", Some("bob".to_string())).unwrap();

        assert_eq!(post.id(), None);
        assert_eq!(post.title(), "Hello");
        assert_eq!(post.content(), "World");
        assert_eq!(post.author(), Some("bob"));
    }

    #[test]
    fn test_new_post_without_author() {
        let post = Post::new("Hello", "World", None).unwrap();
        assert_eq!(post.author(), None);
    }

    #[test]
    fn test_title_length_boundary() {
        let max = "a".repeat(TITLE_MAX_LEN);
        assert!(Post::new(max, "content", None).is_ok());

        let too_long = "a".repeat(TITLE_MAX_LEN + 1);
        let result = Post::new(too_long, "content", None);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_title_length_counts_characters() {
        // 500 multi-byte characters is still a valid title.
        let title = "가".repeat(TITLE_MAX_LEN);
        assert!(Post::new(title, "content", None).is_ok());
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert!(matches!(
            Post::new("", "content", None),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            Post::new("title", "", None),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_update_replaces_title_and_content_only() {
        let mut post =
            Post::from_storage(7, "Hello".into(), "World".into(), Some("bob".into()));

        post.update("Hello2", "World2").unwrap();

        assert_eq!(post.id(), Some(7));
        assert_eq!(post.title(), "Hello2");
        assert_eq!(post.content(), "World2");
        assert_eq!(post.author(), Some("bob"));
    }

    #[test]
    fn test_failed_update_leaves_post_untouched() {
        let mut post = Post::from_storage(1, "Hello".into(), "World".into(), None);

        let result = post.update("Hello2", "");

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(post.title(), "Hello");
        assert_eq!(post.content(), "World");
    }
}
