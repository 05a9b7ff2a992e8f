use std::fmt;

/// A node in the warning category hierarchy.
///
/// Categories form a single-inheritance tree rooted at [`WARNING`]. Filters
/// match a category together with all of its descendants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category {
    name: &'static str,
    parent: Option<&'static Category>,
}

impl Category {
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    pub const fn new(name: &'static str, parent: &'static Category) -> Self {
        Self { name, parent: Some(parent) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&'static Category> {
        self.parent
    }

    /// Whether `self` is `other` or one of its descendants.
    pub fn is_subcategory_of(&self, other: &Category) -> bool {
        let mut current = Some(self);
        while let Some(category) = current {
            if category == other {
                return true;
            }
            current = category.parent;
        }
        false
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub static WARNING: Category = Category::root("Warning");
pub static USER_WARNING: Category = Category::new("UserWarning", &WARNING);
pub static DEPRECATION_WARNING: Category = Category::new("DeprecationWarning", &WARNING);

/// Base category of everything the HTTP client emits.
pub static HTTP_WARNING: Category = Category::new("HTTPWarning", &WARNING);
pub static SECURITY_WARNING: Category = Category::new("SecurityWarning", &HTTP_WARNING);
pub static SUBJECT_ALT_NAME_WARNING: Category = Category::new("SubjectAltNameWarning", &SECURITY_WARNING);
pub static INSECURE_REQUEST_WARNING: Category = Category::new("InsecureRequestWarning", &SECURITY_WARNING);
pub static SYSTEM_TIME_WARNING: Category = Category::new("SystemTimeWarning", &SECURITY_WARNING);
pub static INSECURE_PLATFORM_WARNING: Category = Category::new("InsecurePlatformWarning", &SECURITY_WARNING);
pub static SNI_MISSING_WARNING: Category = Category::new("SNIMissingWarning", &HTTP_WARNING);
pub static INSECURE_DEPRECATION_WARNING: Category = Category::new("InsecureDeprecationWarning", &HTTP_WARNING);
