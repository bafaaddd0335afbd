//! Coordinate transformation functionality

use log::debug;
use std::f64::consts::PI;

use super::point::Point;
use super::bbox::BoundingBox;
use super::crs::CoordinateSystem;
use crate::errors::{ExportError, ExportResult};

/// Reprojects points and rectangles between coordinate systems
///
/// The reverse direction of a transform is the same call with the two
/// systems swapped. Implementations must fail with
/// [`ExportError::TransformError`] when the input lies outside the valid
/// domain of either system, rather than returning clamped garbage.
pub trait CoordinateTransform {
    /// Transform a single point from one system to another
    fn transform_point(&self, point: &Point, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> ExportResult<Point>;

    /// Transform a rectangle, returning the envelope of the result
    fn transform_bbox(&self, bbox: &BoundingBox, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> ExportResult<BoundingBox>;
}

/// Built-in transformer for WGS 84, Web Mercator and UTM
///
/// All conversions pivot through WGS 84 geographic coordinates.
pub struct CoordinateTransformer;

impl CoordinateTransformer {
    /// Earth radius in meters
    const EARTH_RADIUS: f64 = 6378137.0;
    /// WGS 84 flattening
    const FLATTENING: f64 = 1.0 / 298.257223563;
    /// UTM scale factor on the central meridian
    const UTM_SCALE: f64 = 0.9996;
    const UTM_FALSE_EASTING: f64 = 500000.0;
    const UTM_FALSE_NORTHING_SOUTH: f64 = 10000000.0;
    /// Latitude where Web Mercator reaches the edge of its square, atan(sinh(pi))
    pub const MERCATOR_MAX_LAT: f64 = 85.05112877980659;
    /// Half the width of the Web Mercator world square
    pub const MERCATOR_HALF_WORLD: f64 = 20037508.342789244;
    /// Points sampled along each edge of a transformed rectangle
    const EDGE_SAMPLES: usize = 21;

    /// Create a new transformer
    pub fn new() -> Self {
        CoordinateTransformer
    }

    fn domain_error(from_crs: &CoordinateSystem, to_crs: &CoordinateSystem, message: String) -> ExportError {
        ExportError::TransformError {
            from: from_crs.description(),
            to: to_crs.description(),
            message,
        }
    }

    /// Convert from WGS84 (EPSG:4326) to Web Mercator (EPSG:3857)
    ///
    /// Latitudes beyond the Web Mercator limit are clamped to it, so the
    /// result always lies inside the world square.
    pub fn wgs84_to_web_mercator(&self, lon: f64, lat: f64) -> Point {
        let lat = lat.max(-Self::MERCATOR_MAX_LAT).min(Self::MERCATOR_MAX_LAT);

        let x = lon * Self::EARTH_RADIUS * PI / 180.0;
        let y = f64::ln(f64::tan((90.0 + lat) * PI / 360.0)) * Self::EARTH_RADIUS;
        let y = y.max(-Self::MERCATOR_HALF_WORLD).min(Self::MERCATOR_HALF_WORLD);

        Point::new(x, y)
    }

    /// Convert from Web Mercator (EPSG:3857) to WGS84 (EPSG:4326)
    pub fn web_mercator_to_wgs84(&self, x: f64, y: f64) -> Point {
        let lon = x * 180.0 / (Self::EARTH_RADIUS * PI);
        let lat = 180.0 / PI * (2.0 * f64::atan(f64::exp(y / Self::EARTH_RADIUS)) - PI / 2.0);

        Point::new(lon, lat)
    }

    fn central_meridian(zone: u8) -> f64 {
        (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0
    }

    fn eccentricity_squared() -> f64 {
        Self::FLATTENING * (2.0 - Self::FLATTENING)
    }

    /// Convert WGS84 longitude/latitude to UTM easting/northing
    pub fn wgs84_to_utm(&self, lon: f64, lat: f64, zone: u8, is_northern: bool) -> Point {
        let a = Self::EARTH_RADIUS;
        let k0 = Self::UTM_SCALE;
        let e2 = Self::eccentricity_squared();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let ep2 = e2 / (1.0 - e2);

        let phi = lat.to_radians();
        let mut dlon = lon - Self::central_meridian(zone);
        if dlon > 180.0 {
            dlon -= 360.0;
        } else if dlon < -180.0 {
            dlon += 360.0;
        }

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let tan_phi = phi.tan();

        let n = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let big_a = cos_phi * dlon.to_radians();

        let m = a * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin());

        let x = k0 * n * (big_a
            + (1.0 - t + c) * big_a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * big_a.powi(5) / 120.0)
            + Self::UTM_FALSE_EASTING;

        let mut y = k0 * (m + n * tan_phi * (big_a * big_a / 2.0
            + (5.0 - t + 9.0 * c + 4.0 * c * c) * big_a.powi(4) / 24.0
            + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * big_a.powi(6) / 720.0));
        if !is_northern {
            y += Self::UTM_FALSE_NORTHING_SOUTH;
        }

        Point::new(x, y)
    }

    /// Convert UTM easting/northing to WGS84 longitude/latitude
    pub fn utm_to_wgs84(&self, x: f64, y: f64, zone: u8, is_northern: bool) -> Point {
        let a = Self::EARTH_RADIUS;
        let k0 = Self::UTM_SCALE;
        let e2 = Self::eccentricity_squared();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let ep2 = e2 / (1.0 - e2);
        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

        let northing = if is_northern { y } else { y - Self::UTM_FALSE_NORTHING_SOUTH };
        let m = northing / k0;
        let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));

        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let tan_phi1 = phi1.tan();

        let n1 = a / (1.0 - e2 * sin_phi1 * sin_phi1).sqrt();
        let t1 = tan_phi1 * tan_phi1;
        let c1 = ep2 * cos_phi1 * cos_phi1;
        let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_phi1 * sin_phi1).powf(1.5);
        let d = (x - Self::UTM_FALSE_EASTING) / (n1 * k0);

        let phi = phi1 - (n1 * tan_phi1 / r1) * (d * d / 2.0
            - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
            + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1) * d.powi(6) / 720.0);

        let lambda = (d
            - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d.powi(5) / 120.0)
            / cos_phi1;

        Point::new(Self::central_meridian(zone) + lambda.to_degrees(), phi.to_degrees())
    }

    fn to_wgs84(&self, point: &Point, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> ExportResult<Point> {
        let geographic = match from_crs {
            CoordinateSystem::WGS84 => *point,
            CoordinateSystem::WebMercator => {
                let limit = Self::MERCATOR_HALF_WORLD * (1.0 + 1e-9);
                if point.x.abs() > limit || point.y.abs() > limit {
                    return Err(Self::domain_error(from_crs, to_crs, format!(
                        "point ({}, {}) lies outside the Web Mercator world square", point.x, point.y)));
                }
                self.web_mercator_to_wgs84(point.x, point.y)
            },
            CoordinateSystem::UTM(zone, is_northern) => self.utm_to_wgs84(point.x, point.y, *zone, *is_northern),
            CoordinateSystem::Other(_) => {
                return Err(ExportError::UnsupportedTransform {
                    from: from_crs.description(),
                    to: to_crs.description(),
                });
            },
        };

        if !geographic.is_finite() || geographic.y.abs() > 90.0 || geographic.x.abs() > 180.0 + 1e-9 {
            return Err(Self::domain_error(from_crs, to_crs, format!(
                "point ({}, {}) has no valid geographic position", point.x, point.y)));
        }
        Ok(geographic)
    }

    fn from_wgs84(&self, point: &Point, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> ExportResult<Point> {
        match to_crs {
            CoordinateSystem::WGS84 => Ok(*point),
            CoordinateSystem::WebMercator => Ok(self.wgs84_to_web_mercator(point.x, point.y)),
            CoordinateSystem::UTM(zone, is_northern) => {
                let offset = (point.x - Self::central_meridian(*zone)).abs();
                if offset > 45.0 && offset < 315.0 {
                    return Err(Self::domain_error(from_crs, to_crs, format!(
                        "longitude {} is too far from the central meridian of zone {}", point.x, zone)));
                }
                Ok(self.wgs84_to_utm(point.x, point.y, *zone, *is_northern))
            },
            CoordinateSystem::Other(_) => Err(ExportError::UnsupportedTransform {
                from: from_crs.description(),
                to: to_crs.description(),
            }),
        }
    }
}

impl Default for CoordinateTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinateTransform for CoordinateTransformer {
    fn transform_point(&self, point: &Point, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> ExportResult<Point> {
        if !point.is_finite() {
            return Err(Self::domain_error(from_crs, to_crs, "point has non-finite coordinates".to_string()));
        }
        if from_crs == to_crs {
            return Ok(*point);
        }

        let geographic = self.to_wgs84(point, from_crs, to_crs)?;
        let result = self.from_wgs84(&geographic, from_crs, to_crs)?;

        debug!("Transformed ({}, {}) from {} to ({}, {}) in {}",
               point.x, point.y, from_crs.auth_id(), result.x, result.y, to_crs.auth_id());
        Ok(result)
    }

    fn transform_bbox(&self, bbox: &BoundingBox, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> ExportResult<BoundingBox> {
        if from_crs == to_crs {
            return Ok(*bbox);
        }

        // Edges of a rectangle bend under most projections, so sample them
        let steps = Self::EDGE_SAMPLES - 1;
        let mut transformed = Vec::with_capacity(Self::EDGE_SAMPLES * 4);
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = bbox.min_x + bbox.width() * t;
            let y = bbox.min_y + bbox.height() * t;
            for p in [
                Point::new(x, bbox.min_y),
                Point::new(x, bbox.max_y),
                Point::new(bbox.min_x, y),
                Point::new(bbox.max_x, y),
            ] {
                transformed.push(self.transform_point(&p, from_crs, to_crs)?);
            }
        }

        BoundingBox::enclosing(&transformed)
            .ok_or_else(|| Self::domain_error(from_crs, to_crs, "empty rectangle".to_string()))
    }
}
