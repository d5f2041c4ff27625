use crate::post::Post;

/// Posts that are not part of the initial page and get appended in batches.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    posts: Vec<Post>,
}

impl Catalog {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        self.posts.as_slice()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// The next batch after `cursor`, at most `size` posts long.
    pub fn batch(&self, cursor: usize, size: usize) -> &[Post] {
        let start = cursor.min(self.posts.len());
        let end = start.saturating_add(size).min(self.posts.len());
        &self.posts[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::CATALOG;

    #[test]
    fn batch_is_clamped_to_catalog_end() {
        let catalog = Catalog::new(CATALOG.clone());

        assert_eq!(catalog.batch(0, 2).len(), 2);
        assert_eq!(catalog.batch(2, 2).len(), 1);
        assert_eq!(catalog.batch(2, 2)[0].title, "Remote Work Best Practices");
        assert!(catalog.batch(3, 3).is_empty());
        assert!(catalog.batch(10, 3).is_empty());
    }

    #[test]
    fn posts_keep_catalog_order() {
        let catalog = Catalog::new(CATALOG.clone());
        let titles: Vec<&str> = catalog.posts().iter().map(|p| p.title.as_str()).collect();

        assert_eq!(
            titles,
            vec![
                "The Future of Web Development",
                "Minimalist Design Principles",
                "Remote Work Best Practices",
            ]
        );
        assert!(Catalog::default().is_empty());
    }
}
