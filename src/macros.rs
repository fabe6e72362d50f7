/// Builds a [`PropertyTable`](crate::PropertyTable) from `key => value` pairs.
///
/// Keys and values may be anything implementing `Into<String>`. Later pairs
/// overwrite earlier ones with the same key.
///
/// ```rust
/// use serde_properties::properties;
///
/// let table = properties! {
///     "name" => "Michael",
///     "homepage" => String::from("http://example.org"),
/// };
/// assert_eq!(table.len(), 2);
/// ```
#[macro_export]
macro_rules! properties {
    () => {
        $crate::PropertyTable::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut table = $crate::PropertyTable::new();
        $(
            table.set($key, $value);
        )+
        table
    }};
}

#[cfg(test)]
mod tests {
    use crate::PropertyTable;

    #[test]
    fn test_properties_macro_empty() {
        let table: PropertyTable = properties! {};
        assert!(table.is_empty());
    }

    #[test]
    fn test_properties_macro_pairs() {
        let key = String::from("dynamic");
        let table = properties! {
            "a" => "1",
            key => format!("{}", 2),
            "a" => "3"
        };

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a").unwrap(), "3");
        assert_eq!(table.get("dynamic").unwrap(), "2");
    }
}
