/// Concatenates string-like expressions into a `String` with a single allocation.
///
/// ```ignore
/// let stmt = concat_string!("import '", request, "';");
/// ```
#[macro_export]
macro_rules! concat_string {
  () => { String::new() };
  ($($s:expr),+ $(,)?) => {{
    let mut len = 0;
    $( len += AsRef::<str>::as_ref(&$s).len(); )+
    let mut buf = String::with_capacity(len);
    $( buf.push_str($s.as_ref()); )+
    buf
  }};
}

#[test]
fn test_concat_string() {
  let request = String::from("lodash");
  assert_eq!(concat_string!("import '", request, "';"), "import 'lodash';");
  assert_eq!(concat_string!(), "");
}
