/// Optional directives appended to every list/get request: the `include`
/// relation mini-language plus pagination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub include: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListOptions {
    pub fn with_include(include: &str) -> Self {
        Self {
            include: Some(include.to_string()),
            ..Self::default()
        }
    }

    /// Query-string pairs for this option set, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(include) = &self.include {
            pairs.push(("include", include.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }
}
