#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    #[default]
    None,
    SqlSelect,
    /// Insert, update and delete.
    SqlDataChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub fragment: Fragment,
    /// Table names are written as delimited (case sensitive) identifiers.
    pub quote_table_names: bool,
}

impl Context {
    pub fn new(fragment: Fragment, quote_table_names: bool) -> Self {
        Self {
            fragment,
            quote_table_names,
        }
    }
}

impl Context {
    /// Copy of this context inside `fragment`.
    pub fn switch_fragment(&self, fragment: Fragment) -> Context {
        Context { fragment, ..*self }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new(Fragment::None, false)
    }
}
