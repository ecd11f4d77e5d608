//! Accessor generation macros
//!
//! These macros eliminate repetitive match code on node payload enums.
//! They use `paste` internally for identifier concatenation.

// =============================================================================
// Enum accessor generation
// =============================================================================

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with one-field variants
///
/// Uses paste's `:camel` modifier to convert the method name to the variant
/// name and payload type name (`character_data` -> `CharacterData`).
///
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl NodeKind {
///     impl_enum_accessors!(element, text, comment);
/// }
/// ```
#[macro_export]
macro_rules! impl_enum_accessors {
    ($($variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " node"]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                pub fn [<as_ $variant>](&self) -> Option<&[<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut [<$variant:camel>]> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }
            )*
        }
    };
}

/// Generate `value`/`value_mut` for payload structs that wrap a single
/// `value: String` field, plus a `new` constructor.
#[macro_export]
macro_rules! impl_literal_node {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $ty {
                #[doc = concat!("Create a new `", stringify!($ty), "` payload")]
                pub fn new(value: impl Into<String>) -> Self {
                    Self { value: value.into() }
                }

                /// Borrow the payload text
                pub fn value(&self) -> &str {
                    &self.value
                }

                /// Append a fragment to the payload text
                pub fn push_str(&mut self, fragment: &str) {
                    self.value.push_str(fragment);
                }
            }
        )*
    };
}
