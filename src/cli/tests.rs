use super::*;

fn args(list: &[&str]) -> Result<Args> {
    parse(list.iter().map(|s| s.to_string()))
}

#[test]
fn dir_mode_with_flags() {
    let a = args(&["--dir", "/music", "--recursive", "--shuffle"]).unwrap();
    assert_eq!(a.source, Source::Dir(PathBuf::from("/music")));
    assert_eq!(a.recursive, Some(true));
    assert!(a.shuffle);
    assert!(!a.halt);
}

#[test]
fn usb_mode_with_halt() {
    let a = args(&["--usb", "--halt"]).unwrap();
    assert_eq!(a.source, Source::Usb);
    assert!(a.halt);
}

#[test]
fn songs_mode_takes_the_rest_in_order() {
    let a = args(&["--shuffle", "--songs", "a.mp3", "b.mp3", "c.mp3"]).unwrap();
    match a.source {
        Source::Files(files) => {
            assert_eq!(files, vec![
                PathBuf::from("a.mp3"),
                PathBuf::from("b.mp3"),
                PathBuf::from("c.mp3"),
            ]);
        }
        other => panic!("unexpected source {other:?}"),
    }
    assert!(a.shuffle);
}

#[test]
fn single_dash_spelling_is_accepted() {
    let a = args(&["-usb", "-halt"]).unwrap();
    assert_eq!(a.source, Source::Usb);
    assert!(a.halt);
}

#[test]
fn rejects_missing_or_conflicting_sources() {
    assert!(args(&[]).is_err());
    assert!(args(&["--shuffle"]).is_err());
    assert!(args(&["--dir"]).is_err());
    assert!(args(&["--songs"]).is_err());
    assert!(args(&["--usb", "--dir", "/music"]).is_err());
    assert!(args(&["--frobnicate"]).is_err());
}
