use crate::error::{AppError, AppResult};
use crate::models::{CountryCode, LatLng};
use crate::viewport::Camera;
use geo::{BoundingRect, Contains, Geometry, Intersects, MultiPolygon, Point, Rect};
use geojson::GeoJson;
use serde_json::{Map, Value};
use std::fmt::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Property holding the country code on each boundary feature.
pub const CODE_PROPERTY: &str = "ISO2";

const BUNDLED_BOUNDARIES: &str = include_str!("../assets/countries.geojson");

#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryFeature {
    pub code: Option<CountryCode>,
    pub properties: Map<String, Value>,
    pub shape: MultiPolygon<f64>,
    bbox: Option<Rect<f64>>,
}

impl BoundaryFeature {
    fn new(properties: Map<String, Value>, shape: MultiPolygon<f64>) -> Self {
        let code = properties
            .get(CODE_PROPERTY)
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok());
        let bbox = shape.bounding_rect();
        Self {
            code,
            properties,
            shape,
            bbox,
        }
    }

    pub fn contains(&self, p: LatLng) -> bool {
        let point = Point::new(p.lng, p.lat);
        match self.bbox {
            Some(rect) if !rect.intersects(&point) => false,
            Some(_) => self.shape.contains(&point),
            None => false,
        }
    }

    /// SVG path data for this feature under `camera`, one subpath per ring.
    pub fn svg_path(&self, camera: &Camera) -> String {
        let mut d = String::new();
        for polygon in &self.shape {
            let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
            for ring in rings {
                for (i, c) in ring.coords().enumerate() {
                    let (x, y) = camera.project(LatLng::new(c.y, c.x));
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    let _ = write!(d, "{}{:.1} {:.1}", cmd, x, y);
                }
                d.push('Z');
            }
        }
        d
    }
}

/// The country polygon overlay and its click resolution.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct BoundaryLayer {
    features: Vec<BoundaryFeature>,
}

impl BoundaryLayer {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let geojson: GeoJson = raw.parse()?;
        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => {
                return Err(AppError::Boundaries(
                    "expected a FeatureCollection".to_string(),
                ))
            }
        };

        let mut features = Vec::with_capacity(collection.features.len());
        for feature in collection.features {
            let properties = feature.properties.unwrap_or_default();
            let Some(gj) = feature.geometry else {
                continue;
            };
            let geom: Geometry<f64> = gj.value.try_into()?;
            let shape = match geom {
                Geometry::Polygon(p) => MultiPolygon(vec![p]),
                Geometry::MultiPolygon(m) => m,
                other => {
                    debug!("Skipping non-polygon boundary geometry: {:?}", other);
                    continue;
                }
            };
            let feature = BoundaryFeature::new(properties, shape);
            if feature.code.is_none() {
                warn!(
                    "Boundary feature without a usable {} property: {:?}",
                    CODE_PROPERTY,
                    feature.properties.get(CODE_PROPERTY)
                );
            }
            features.push(feature);
        }

        Ok(Self { features })
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn bundled() -> AppResult<Self> {
        Self::parse(BUNDLED_BOUNDARIES)
    }

    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature under the point, if any.
    pub fn feature_at(&self, p: LatLng) -> Option<&BoundaryFeature> {
        self.features.iter().find(|f| f.contains(p))
    }

    /// Country code of the feature under the point. Features without a valid
    /// code count as a miss.
    pub fn code_at(&self, p: LatLng) -> Option<CountryCode> {
        self.feature_at(p).and_then(|f| f.code.clone())
    }
}
