use std::path::Path;

use fitsbridge::bindings::{NativeCore, default_library_name};
use fitsbridge::{Error, Preview};

#[test]
fn test_default_library_name_matches_pointer_width() {
    let name = default_library_name();
    if std::mem::size_of::<usize>() == 8 {
        assert!(name.contains("fitscore64"), "got {name}");
    } else {
        assert!(name.contains("fitscore32"), "got {name}");
    }
    assert!(name.ends_with(std::env::consts::DLL_SUFFIX));
}

#[test]
fn test_missing_core_library_is_reported_not_fatal() {
    let result = NativeCore::load_from(Path::new("tests/data/no-such-core.so"));
    assert!(matches!(result, Err(Error::CoreUnavailable(_))));
}

#[test]
fn test_preview_load_native_propagates_load_failure() {
    let result = Preview::load_native(Some(Path::new("tests/data/no-such-dir")));
    assert!(matches!(result, Err(Error::CoreUnavailable(_))));
}
