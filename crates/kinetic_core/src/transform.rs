//! Transform descriptors handed to render sinks

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A transform property a motion object can emit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformProperty {
    X,
    Y,
    ScaleX,
    ScaleY,
    Rotation,
    SkewX,
    SkewY,
}

impl TransformProperty {
    /// Canonical emission order
    pub const ALL: [TransformProperty; 7] = [
        TransformProperty::X,
        TransformProperty::Y,
        TransformProperty::ScaleX,
        TransformProperty::ScaleY,
        TransformProperty::Rotation,
        TransformProperty::SkewX,
        TransformProperty::SkewY,
    ];

    /// Parse a property name (`"x"`, `"scaleX"`, `"skewY"`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "x" => Some(TransformProperty::X),
            "y" => Some(TransformProperty::Y),
            "scaleX" => Some(TransformProperty::ScaleX),
            "scaleY" => Some(TransformProperty::ScaleY),
            "rotation" => Some(TransformProperty::Rotation),
            "skewX" => Some(TransformProperty::SkewX),
            "skewY" => Some(TransformProperty::SkewY),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransformProperty::X => "x",
            TransformProperty::Y => "y",
            TransformProperty::ScaleX => "scaleX",
            TransformProperty::ScaleY => "scaleY",
            TransformProperty::Rotation => "rotation",
            TransformProperty::SkewX => "skewX",
            TransformProperty::SkewY => "skewY",
        }
    }
}

/// Ordered, deduplicated subset of transform properties.
///
/// Insertion order is kept; a repeated property keeps its first position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertySet {
    props: SmallVec<[TransformProperty; 7]>,
}

impl PropertySet {
    pub fn empty() -> Self {
        Self {
            props: SmallVec::new(),
        }
    }

    /// All seven properties in canonical order
    pub fn all() -> Self {
        Self::from_iter(TransformProperty::ALL)
    }

    /// Build from property names, skipping names that are not recognised
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self::from_iter(names.into_iter().filter_map(TransformProperty::from_name))
    }

    pub fn insert(&mut self, prop: TransformProperty) {
        if !self.props.contains(&prop) {
            self.props.push(prop);
        }
    }

    pub fn contains(&self, prop: TransformProperty) -> bool {
        self.props.contains(&prop)
    }

    pub fn iter(&self) -> impl Iterator<Item = TransformProperty> + '_ {
        self.props.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl Default for PropertySet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<TransformProperty> for PropertySet {
    fn from_iter<I: IntoIterator<Item = TransformProperty>>(iter: I) -> Self {
        let mut set = Self::empty();
        for prop in iter {
            set.insert(prop);
        }
        set
    }
}

impl Serialize for PropertySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.props.iter().map(|p| p.name()))
    }
}

impl<'de> Deserialize<'de> for PropertySet {
    /// Unknown names are ignored rather than rejected
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names: Vec<String> = Vec::deserialize(deserializer)?;
        Ok(Self::from_names(names.iter().map(String::as_str)))
    }
}

/// Transform applied to one element.
///
/// Every field is optional; only the properties an object is configured to
/// emit are set. Rotation and skew are degrees, translation is pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew_y: Option<f32>,
}

impl TransformDescriptor {
    /// Translation plus rotation, as emitted by autonomous objects
    pub fn translate_rotate(x: f32, y: f32, rotation: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            rotation: Some(rotation),
            ..Default::default()
        }
    }

    /// Rotation only (used for counter-rotated children)
    pub fn rotation(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    pub fn get(&self, prop: TransformProperty) -> Option<f32> {
        match prop {
            TransformProperty::X => self.x,
            TransformProperty::Y => self.y,
            TransformProperty::ScaleX => self.scale_x,
            TransformProperty::ScaleY => self.scale_y,
            TransformProperty::Rotation => self.rotation,
            TransformProperty::SkewX => self.skew_x,
            TransformProperty::SkewY => self.skew_y,
        }
    }

    pub fn set(&mut self, prop: TransformProperty, value: f32) {
        let slot = match prop {
            TransformProperty::X => &mut self.x,
            TransformProperty::Y => &mut self.y,
            TransformProperty::ScaleX => &mut self.scale_x,
            TransformProperty::ScaleY => &mut self.scale_y,
            TransformProperty::Rotation => &mut self.rotation,
            TransformProperty::SkewX => &mut self.skew_x,
            TransformProperty::SkewY => &mut self.skew_y,
        };
        *slot = Some(value);
    }

    /// Emitted `(property, value)` pairs in the given order
    pub fn entries<'a>(
        &'a self,
        order: &'a PropertySet,
    ) -> impl Iterator<Item = (TransformProperty, f32)> + 'a {
        order.iter().filter_map(|p| self.get(p).map(|v| (p, v)))
    }

    /// True when every emitted property is at its neutral value
    pub fn is_identity(&self) -> bool {
        let zero = |v: Option<f32>| v.map_or(true, |v| v == 0.0);
        let one = |v: Option<f32>| v.map_or(true, |v| v == 1.0);
        zero(self.x)
            && zero(self.y)
            && one(self.scale_x)
            && one(self.scale_y)
            && zero(self.rotation)
            && zero(self.skew_x)
            && zero(self.skew_y)
    }
}

/// 2D tilt handed to a 3D viewport collaborator (radians)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Tilt {
    /// Rotation around the horizontal axis
    pub x: f32,
    /// Rotation around the vertical axis
    pub y: f32,
    /// Accumulated autonomous spin around the view axis
    pub spin: f32,
}
