/// Tag whose replacement value names the output file
pub const DEFAULT_RENAME_TAG: &str = "[LUMCAT]";

/// Appended to the rename key to form the output entry name
pub const DEFAULT_RENAME_SUFFIX: &str = "_IES.IES";

/// `"<rename_key><suffix>"` when a key was captured, else the input name.
///
/// The key comes from a table cell, so path separators and a leading `..`
/// are replaced with `_` to keep the entry at the archive root.
pub fn output_name(rename_key: Option<&str>, original_name: &str, suffix: &str) -> String {
    match rename_key {
        Some(key) if !key.is_empty() => format!("{}{suffix}", entry_stem(key)),
        _ => original_name.to_string(),
    }
}

fn entry_stem(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    match stem.strip_prefix("..") {
        Some(rest) => format!("__{rest}"),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames_when_key_present() {
        assert_eq!(
            output_name(Some("C01181523"), "foo.ies", DEFAULT_RENAME_SUFFIX),
            "C01181523_IES.IES"
        );
    }

    #[test]
    fn reuses_input_name_otherwise() {
        assert_eq!(output_name(None, "foo.ies", DEFAULT_RENAME_SUFFIX), "foo.ies");
        assert_eq!(
            output_name(Some(""), "Bar.IES", DEFAULT_RENAME_SUFFIX),
            "Bar.IES"
        );
    }

    #[test]
    fn rename_key_cannot_leave_archive_root() {
        assert_eq!(
            output_name(Some("../x"), "foo.ies", DEFAULT_RENAME_SUFFIX),
            "___x_IES.IES"
        );
        assert_eq!(
            output_name(Some("a/b\\c"), "foo.ies", DEFAULT_RENAME_SUFFIX),
            "a_b_c_IES.IES"
        );
        assert_eq!(
            output_name(Some("..evil"), "foo.ies", DEFAULT_RENAME_SUFFIX),
            "__evil_IES.IES"
        );
        // dots elsewhere are ordinary characters
        assert_eq!(
            output_name(Some("C1.2..3"), "foo.ies", DEFAULT_RENAME_SUFFIX),
            "C1.2..3_IES.IES"
        );
    }
}
