//! Tests for the bounding box type

extern crate std;

use crate::coordinate::{BoundingBox, Point};

#[test]
fn test_bbox_normalises_corners() {
    let bbox = BoundingBox::new(10.0, 20.0, 0.0, 5.0);
    std::assert_eq!(bbox, BoundingBox::new(0.0, 5.0, 10.0, 20.0));
    std::assert_eq!(bbox.width(), 10.0);
    std::assert_eq!(bbox.height(), 15.0);
}

#[test]
fn test_bbox_center_and_from_center() {
    let bbox = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    std::assert_eq!(bbox.center(), Point::new(50.0, 25.0));

    let pixel = BoundingBox::from_center(&bbox.center(), 4.0, 2.0);
    std::assert_eq!(pixel, BoundingBox::new(48.0, 24.0, 52.0, 26.0));
    std::assert!(bbox.contains(&pixel.center()));
}

#[test]
fn test_bbox_from_string() {
    let bbox = BoundingBox::from_string(" 1.5, -2 ,3,4 ").unwrap();
    std::assert_eq!(bbox, BoundingBox::new(1.5, -2.0, 3.0, 4.0));

    std::assert!(BoundingBox::from_string("1,2,3").is_err());
    std::assert!(BoundingBox::from_string("1,2,x,4").is_err());
}

#[test]
fn test_bbox_enclosing_points() {
    let points = [Point::new(3.0, -1.0), Point::new(-2.0, 4.0), Point::new(0.0, 0.0)];
    let bbox = BoundingBox::enclosing(&points).unwrap();
    std::assert_eq!(bbox, BoundingBox::new(-2.0, -1.0, 3.0, 4.0));
    std::assert!(BoundingBox::enclosing(&[]).is_none());
}

#[test]
fn test_bbox_empty() {
    std::assert!(BoundingBox::new(0.0, 0.0, 0.0, 10.0).is_empty());
    std::assert!(!BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_empty());
}
