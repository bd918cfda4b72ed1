use std::fmt::Debug;

/// Default response group for item lookups.
pub const DEFAULT_LOOKUP_RESPONSE_GROUP: &str =
    "Images,ItemAttributes,VariationImages,Reviews,Similarities";

/// An invocable remote action: its name plus the operation-specific
/// parameters.
///
/// Parameter values are raw, unencoded strings. Encoding and ordering are
/// the signer's job; the order returned here carries no significance.
/// Reserved parameters (`Operation`, `Timestamp`, ...) must never appear
/// here: the signer injects them and rejects collisions.
pub trait Operation: Debug + Send + Sync {
    /// The remote action name, e.g. `ItemSearch`.
    fn name(&self) -> &'static str;

    /// The operation-specific parameters.
    fn parameters(&self) -> Vec<(String, String)>;
}

/// Search items by keyword.
#[derive(Debug, Clone)]
pub struct ItemSearch {
    keywords: String,
    page: Option<u32>,
    search_index: Option<String>,
    response_group: Option<String>,
}

impl ItemSearch {
    /// Create a new keyword search.
    pub fn new(keywords: &str) -> Self {
        Self {
            keywords: keywords.to_string(),
            page: None,
            search_index: None,
            response_group: None,
        }
    }

    /// Select the result page, starting at 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Restrict the search to a search index (category), e.g. `Books`.
    pub fn with_search_index(mut self, search_index: &str) -> Self {
        self.search_index = Some(search_index.to_string());
        self
    }

    /// Select the response groups to return.
    pub fn with_response_group(mut self, response_group: &str) -> Self {
        self.response_group = Some(response_group.to_string());
        self
    }
}

impl Operation for ItemSearch {
    fn name(&self) -> &'static str {
        "ItemSearch"
    }

    fn parameters(&self) -> Vec<(String, String)> {
        let mut params = vec![("Keywords".to_string(), self.keywords.clone())];
        if let Some(page) = self.page {
            params.push(("ItemPage".to_string(), page.to_string()));
        }
        if let Some(v) = &self.search_index {
            params.push(("SearchIndex".to_string(), v.clone()));
        }
        if let Some(v) = &self.response_group {
            params.push(("ResponseGroup".to_string(), v.clone()));
        }
        params
    }
}

/// Look up a single item by its identifier (ASIN).
#[derive(Debug, Clone)]
pub struct ItemLookup {
    item_id: String,
    response_group: String,
    include_reviews_summary: bool,
}

impl ItemLookup {
    /// Create a new item lookup.
    pub fn new(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            response_group: DEFAULT_LOOKUP_RESPONSE_GROUP.to_string(),
            include_reviews_summary: true,
        }
    }

    /// Select the response groups to return.
    pub fn with_response_group(mut self, response_group: &str) -> Self {
        self.response_group = response_group.to_string();
        self
    }

    /// Include or exclude the reviews summary. Included by default.
    pub fn with_include_reviews_summary(mut self, include: bool) -> Self {
        self.include_reviews_summary = include;
        self
    }
}

impl Operation for ItemLookup {
    fn name(&self) -> &'static str {
        "ItemLookup"
    }

    fn parameters(&self) -> Vec<(String, String)> {
        vec![
            ("ItemId".to_string(), self.item_id.clone()),
            ("ResponseGroup".to_string(), self.response_group.clone()),
            (
                "IncludeReviewsSummary".to_string(),
                if self.include_reviews_summary {
                    "True".to_string()
                } else {
                    "False".to_string()
                },
            ),
        ]
    }
}

/// Search items within a category (search index) and browse node.
#[derive(Debug, Clone)]
pub struct BrowseNodeSearch {
    search_index: String,
    browse_node: String,
    page: Option<u32>,
    response_group: Option<String>,
}

impl BrowseNodeSearch {
    /// Create a new browse node search in the given search index.
    pub fn new(search_index: &str, browse_node: &str) -> Self {
        Self {
            search_index: search_index.to_string(),
            browse_node: browse_node.to_string(),
            page: None,
            response_group: None,
        }
    }

    /// Select the result page, starting at 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Select the response groups to return.
    pub fn with_response_group(mut self, response_group: &str) -> Self {
        self.response_group = Some(response_group.to_string());
        self
    }
}

impl Operation for BrowseNodeSearch {
    fn name(&self) -> &'static str {
        "ItemSearch"
    }

    fn parameters(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("SearchIndex".to_string(), self.search_index.clone()),
            ("BrowseNode".to_string(), self.browse_node.clone()),
        ];
        if let Some(page) = self.page {
            params.push(("ItemPage".to_string(), page.to_string()));
        }
        if let Some(v) = &self.response_group {
            params.push(("ResponseGroup".to_string(), v.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_search_parameters() {
        let op = ItemSearch::new("harry potter")
            .with_page(2)
            .with_search_index("Books");

        assert_eq!(op.name(), "ItemSearch");
        assert_eq!(
            op.parameters(),
            vec![
                ("Keywords".to_string(), "harry potter".to_string()),
                ("ItemPage".to_string(), "2".to_string()),
                ("SearchIndex".to_string(), "Books".to_string()),
            ]
        );
    }

    #[test]
    fn test_item_lookup_defaults() {
        let op = ItemLookup::new("0679722769");

        assert_eq!(op.name(), "ItemLookup");
        assert_eq!(
            op.parameters(),
            vec![
                ("ItemId".to_string(), "0679722769".to_string()),
                (
                    "ResponseGroup".to_string(),
                    DEFAULT_LOOKUP_RESPONSE_GROUP.to_string()
                ),
                ("IncludeReviewsSummary".to_string(), "True".to_string()),
            ]
        );
    }

    #[test]
    fn test_browse_node_search_is_an_item_search() {
        let op = BrowseNodeSearch::new("Books", "1025612").with_page(1);

        assert_eq!(op.name(), "ItemSearch");
        let params = op.parameters();
        assert!(params.contains(&("SearchIndex".to_string(), "Books".to_string())));
        assert!(params.contains(&("BrowseNode".to_string(), "1025612".to_string())));
    }
}
