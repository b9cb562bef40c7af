#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Visibility {
    pub visible: bool,
    /// Whether pointer rays may hit the entity.
    pub pickable: bool,
}

impl Visibility {
    pub fn visible() -> Self {
        Self {
            visible: true,
            pickable: false,
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            pickable: false,
        }
    }

    pub fn interactive() -> Self {
        Self {
            visible: true,
            pickable: true,
        }
    }
}
