use fourierplot::app::{icon_from_svg, ICON_SIZE};

const ICON: &[u8] = include_bytes!("../icon.svg");

#[test]
fn bundled_icon_renders_at_requested_size() {
    let icon = icon_from_svg(ICON, ICON_SIZE).unwrap();
    assert_eq!((icon.width, icon.height), (ICON_SIZE, ICON_SIZE));
    assert_eq!(icon.rgba.len(), (ICON_SIZE * ICON_SIZE * 4) as usize);
    // the background square is opaque in the middle
    let mid = ((ICON_SIZE / 2) * ICON_SIZE + ICON_SIZE / 2) as usize * 4;
    assert_eq!(icon.rgba[mid + 3], 255);
}

#[test]
fn wide_documents_are_letterboxed() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
        <rect width="200" height="100" fill="#ff0000"/></svg>"##;
    let icon = icon_from_svg(svg, 64).unwrap();
    let alpha = |x: u32, y: u32| icon.rgba[((y * 64 + x) * 4 + 3) as usize];
    assert_eq!(alpha(32, 2), 0);
    assert_eq!(alpha(32, 32), 255);
    assert_eq!(alpha(32, 61), 0);
}

#[test]
fn invalid_documents_give_no_icon() {
    assert!(icon_from_svg(b"not an svg", 64).is_none());
    assert!(icon_from_svg(ICON, 0).is_none());
}
