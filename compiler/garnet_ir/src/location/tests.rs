use super::*;

#[test]
fn test_location_basic() {
    let loc = Location::new(10, 20);
    assert_eq!(loc.len(), 10);
    assert!(!loc.is_empty());
    assert!(loc.contains(15));
    assert!(!loc.contains(20));
}

#[test]
fn test_location_join() {
    let a = Location::new(10, 20);
    let b = Location::new(15, 30);
    assert_eq!(a.join(b), Location::new(10, 30));
    assert_eq!(b.join(a), Location::new(10, 30));
}

#[test]
fn test_location_point_is_empty() {
    let loc = Location::point(7);
    assert!(loc.is_empty());
    assert!(!loc.contains(7));
    assert!(Location::new(0, 10).contains_location(loc));
}

#[test]
fn test_location_try_from_offsets() {
    assert_eq!(Location::try_from_offsets(3, 9), Ok(Location::new(3, 9)));
    assert!(matches!(
        Location::try_from_offsets(u64::from(u32::MAX) + 1, u64::from(u32::MAX) + 2),
        Err(LocationError::StartTooLarge(_))
    ));
    assert!(matches!(
        Location::try_from_offsets(0, u64::from(u32::MAX) + 1),
        Err(LocationError::EndTooLarge(_))
    ));
    assert!(matches!(
        Location::try_from_offsets(5, 4),
        Err(LocationError::Inverted { start: 5, end: 4 })
    ));
}

#[test]
fn test_location_slice_checks_bounds() {
    let source = b"foo.bar";
    assert_eq!(Location::new(4, 7).slice(source), Some(&b"bar"[..]));
    assert_eq!(Location::new(4, 8).slice(source), None);
}

#[test]
fn test_location_extend_never_shrinks() {
    let loc = Location::new(5, 10);
    assert_eq!(loc.extend_to(8), loc);
    assert_eq!(loc.extend_to(12), Location::new(5, 12));
}

#[test]
fn test_location_error_display() {
    let msg = LocationError::StartTooLarge(0x1_0000_0000).to_string();
    assert!(msg.contains("start"));
    assert!(msg.contains("0x100000000"));
}
