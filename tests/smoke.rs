//! Integration smoke tests for `grade_report`

use grade_report::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}
