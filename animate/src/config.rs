use {
    crate::{
        error::RigError,
        joint::JointConfig,
        rig::Rig,
        segment::{AttachVertex, Segment, Taper},
    },
    nalgebra as na,
    std::{path::Path, str::FromStr},
};

/// Declarative description of a skeleton and its joints.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct RigConfig {
    #[serde(default)]
    pub segments: Vec<SegmentDef>,

    #[serde(default)]
    pub joints: Vec<JointDef>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct SegmentDef {
    pub name: String,

    #[serde(default)]
    pub anchor: [f32; 3],

    pub direction: [f32; 3],
    pub length: f32,
    pub taper: Taper,

    /// Name of a segment declared earlier.
    #[serde(default)]
    pub parent: Option<String>,

    #[serde(default)]
    pub attach: Option<AttachVertex>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct JointDef {
    pub segment: String,
    pub axis: [f32; 3],

    /// Defaults to the segment's declared direction.
    #[serde(default)]
    pub base_dir: Option<[f32; 3]>,

    #[serde(default)]
    pub min: f32,

    #[serde(default)]
    pub max: f32,

    #[serde(default = "default_speed")]
    pub speed: f32,

    #[serde(default)]
    pub offset: f32,

    /// Declaration indices of dependent joints.
    #[serde(default)]
    pub children: Vec<usize>,
}

fn default_speed() -> f32 {
    1.0
}

impl FromStr for RigConfig {
    type Err = RigError;

    fn from_str(source: &str) -> Result<Self, RigError> {
        Ok(ron::de::from_str(source)?)
    }
}

impl RigConfig {
    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, RigError> {
        Ok(ron::de::from_reader(std::fs::File::open(path)?)?)
    }

    /// Creates segments and joints in declaration order.
    pub fn build(&self) -> Result<Rig, RigError> {
        let mut rig = Rig::new();

        for def in &self.segments {
            if rig.segment_id(&def.name).is_some() {
                return Err(RigError::DuplicateSegment(def.name.clone()));
            }

            let parent = match &def.parent {
                None => None,
                Some(parent) => match rig.segment_id(parent) {
                    Some(id) => Some(id),
                    None => {
                        return Err(RigError::UnknownParent {
                            segment: def.name.clone(),
                            parent: parent.clone(),
                        })
                    }
                },
            };

            let [x, y, z] = def.anchor;
            let segment = Segment {
                anchor: na::Point3::new(x, y, z),
                direction: na::Vector3::from(def.direction),
                length: def.length,
                taper: def.taper,
                parent,
                attach: def.attach,
            };
            rig.insert_segment(def.name.clone(), segment);
        }

        for (index, def) in self.joints.iter().enumerate() {
            let (id, segment) = rig
                .segment_id(&def.segment)
                .and_then(|id| Some((id, rig.segments.get(id)?)))
                .ok_or_else(|| RigError::UnknownSegment {
                    joint: index,
                    segment: def.segment.clone(),
                })?;

            let base_dir = def
                .base_dir
                .map(na::Vector3::from)
                .unwrap_or(segment.direction);

            rig.joints.add_joint(
                JointConfig::new(id, na::Vector3::from(def.axis), base_dir)
                    .with_range(def.min, def.max)
                    .with_phase(def.speed, def.offset)
                    .with_children(def.children.iter().copied()),
            );
        }

        tracing::debug!(
            "Rig built: {} segments, {} joints",
            rig.segments.len(),
            rig.joints.len()
        );

        Ok(rig)
    }
}
