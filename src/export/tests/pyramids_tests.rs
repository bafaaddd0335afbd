//! Tests for pyramid options

extern crate std;

use crate::coordinate::{BoundingBox, CoordinateSystem};
use crate::export::{PyramidOptions, PyramidsFlag, PyramidsFormat, ResamplingMethod};
use crate::source::SourceInfo;

fn source() -> SourceInfo {
    SourceInfo::gridded(BoundingBox::new(0.0, 0.0, 1000.0, 500.0), 1000, 500, CoordinateSystem::Other(1))
}

#[test]
fn test_disabled_by_default() {
    let mut options = PyramidOptions::default();
    options.set_levels(vec![2, 4]);
    std::assert_eq!(options.build_flag(), PyramidsFlag::No);
    std::assert!(options.pyramids_list().is_empty());
    std::assert_eq!(options.resolutions_text(&source()), "");
    std::assert_eq!(options.resampling(), ResamplingMethod::Nearest);
    std::assert_eq!(options.format(), PyramidsFormat::Internal);
}

#[test]
fn test_enabled_levels() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut options = PyramidOptions::default();
    options.set_enabled(true);
    options.set_levels(vec![2, 4, 8]);
    std::assert_eq!(options.build_flag(), PyramidsFlag::Yes);
    std::assert_eq!(options.pyramids_list(), vec![2, 4, 8]);
    std::assert_eq!(options.resolutions_text(&source()), "500x250 250x125 125x63");
    std::assert!(options.validate().is_ok());
}

#[test]
fn test_validate() {
    let mut options = PyramidOptions::default();
    options.set_enabled(true);
    options.set_levels(vec![1, 2]);
    std::assert!(options.validate().is_err());

    options.set_levels(vec![2]);
    options.create_options_mut().set_enabled(true);
    options.create_options_mut().set_options(vec!["COMPRESS_OVERVIEW=BOGUS".to_string()]);
    std::assert!(options.validate().is_err());
}

#[test]
fn test_names() {
    std::assert_eq!(ResamplingMethod::from_name("average").unwrap(), ResamplingMethod::Average);
    std::assert_eq!(ResamplingMethod::CubicSpline.to_string(), "CUBICSPLINE");
    std::assert!(ResamplingMethod::from_name("bilinear").is_err());
    std::assert_eq!(PyramidsFormat::from_name("erdas").unwrap(), PyramidsFormat::ExternalErdas);
    std::assert_eq!(PyramidsFormat::from_name("OVR").unwrap(), PyramidsFormat::External);
    std::assert!(PyramidsFormat::from_name("zip").is_err());
}
