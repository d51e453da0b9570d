use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct MovieTitle(String);

impl MovieTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }
}
