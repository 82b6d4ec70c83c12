use std::fmt;

/// Locator strategy plus selector value, identifying zero or more elements
/// in the current document.
///
/// A `Locator` is immutable once constructed and is owned by whichever
/// page object or test defines it. The same locator may be polled any
/// number of times; querying the document with it is side-effect-free.
///
/// # Example:
/// ```rust
/// use syncwait::Locator;
///
/// let logo = Locator::Id("logo".into());
/// let buttons = Locator::Css("div[data-section='cart'] button".into());
/// assert_eq!(format!("{}", logo), "id=logo");
/// # let _ = buttons;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Id(String),
    XPath(String),
    LinkText(String),
    PartialLinkText(String),
    Name(String),
    Tag(String),
    ClassName(String),
    Css(String),
}

impl Locator {
    /// Return the W3C-compatible `(using, value)` selector pair for this locator.
    ///
    /// Strategies without a native W3C equivalent (id, name, class name) are
    /// expressed as CSS selectors, matching what the mainstream WebDriver
    /// clients send on the wire.
    pub fn w3c_selector(&self) -> (&'static str, String) {
        match self {
            Locator::Id(id) => ("css selector", format!(r##"[id="{}"]"##, id)),
            Locator::XPath(x) => ("xpath", x.clone()),
            Locator::LinkText(text) => ("link text", text.clone()),
            Locator::PartialLinkText(text) => ("partial link text", text.clone()),
            Locator::Name(name) => ("css selector", format!(r##"[name="{}"]"##, name)),
            Locator::Tag(tag) => ("tag name", tag.clone()),
            Locator::ClassName(name) => ("css selector", format!(".{}", name)),
            Locator::Css(css) => ("css selector", css.clone()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(v) => write!(f, "id={}", v),
            Locator::XPath(v) => write!(f, "xpath={}", v),
            Locator::LinkText(v) => write!(f, "link text={}", v),
            Locator::PartialLinkText(v) => write!(f, "partial link text={}", v),
            Locator::Name(v) => write!(f, "name={}", v),
            Locator::Tag(v) => write!(f, "tag={}", v),
            Locator::ClassName(v) => write!(f, "class={}", v),
            Locator::Css(v) => write!(f, "css={}", v),
        }
    }
}
