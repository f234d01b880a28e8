//! Macros for reducing boilerplate when describing shapeable types
//!
//! These macros generate the property descriptor tables that drive data
//! shaping and in-memory ordering.

/// Implement [`Shapeable`](crate::core::property::Shapeable) for a struct
///
/// Each entry maps a canonical property name to a struct field. Properties
/// are listed in declaration order, which is the order of a shaped record
/// when no field selection is requested. Field values are cloned into
/// [`FieldValue`](crate::core::field::FieldValue) through its `From` impls.
///
/// # Example
///
/// ```rust,ignore
/// use course_library::prelude::*;
///
/// pub struct BookDto {
///     pub id: Uuid,
///     pub title: String,
///     pub pages: i64,
/// }
///
/// impl_shapeable!(BookDto {
///     "id" => id,
///     "title" => title,
///     "pages" => pages,
/// });
///
/// let records = vec![book].shape_data(Some("title"))?;
/// ```
#[macro_export]
macro_rules! impl_shapeable {
    (
        $type:ident {
            $( $name:literal => $field:ident ),* $(,)?
        }
    ) => {
        impl $crate::core::property::Shapeable for $type {
            fn describe_properties(
            ) -> ::std::vec::Vec<$crate::core::property::PropertyDescriptor<Self>> {
                ::std::vec![
                    $(
                        $crate::core::property::PropertyDescriptor::new(
                            $name,
                            |item: &$type| {
                                $crate::core::field::FieldValue::from(
                                    ::std::clone::Clone::clone(&item.$field),
                                )
                            },
                        )
                    ),*
                ]
            }
        }
    };
}
