/// Number of locations that share the same category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFrequency {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopCategory {
    pub category: String,
    pub count: usize,
    pub photo: Option<String>,
}
