use {
    crate::{camera::OrbitCamera, skeleton},
    animate::{Clocks, Rig, RigConfig},
    color_eyre::Report,
    eyre::WrapErr,
    nalgebra as na,
    std::path::PathBuf,
};

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub enum RigSource {
    Walking,
    Standing,
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Animation time added per tick.
    #[serde(default = "default_time_step")]
    pub time_step: f32,

    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,

    /// Stop after this many ticks.
    #[serde(default)]
    pub frames: Option<u64>,

    #[serde(default = "default_rig")]
    pub rig: RigSource,

    /// Limb tips are logged once per this many frames.
    #[serde(default = "default_report_every")]
    pub report_every: u64,

    #[serde(default)]
    pub camera: CameraConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_radius")]
    pub radius: f32,

    #[serde(default = "default_height")]
    pub height: f32,

    #[serde(default = "default_orbit_speed")]
    pub speed: f32,

    #[serde(default = "default_target")]
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            radius: default_radius(),
            height: default_height(),
            speed: default_orbit_speed(),
            target: default_target(),
        }
    }
}

impl CameraConfig {
    pub fn into_camera(self) -> OrbitCamera {
        let [x, y, z] = self.target;
        OrbitCamera {
            radius: self.radius,
            height: self.height,
            speed: self.speed,
            target: na::Point3::new(x, y, z),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            time_step: default_time_step(),
            frame_rate: default_frame_rate(),
            frames: None,
            rig: default_rig(),
            report_every: default_report_every(),
            camera: CameraConfig::default(),
        }
    }
}

impl Config {
    pub fn load_default() -> Result<Self, Report> {
        // Explicit path must exist, default one is optional.
        if let Ok(path) = std::env::var("WALKER_CONFIG_PATH") {
            return Self::load(PathBuf::from(path));
        }

        let path = PathBuf::from("./cfg.ron");
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!("No '{}', using defaults", path.display());
            Ok(Config::default())
        }
    }

    #[tracing::instrument]
    pub fn load(path: PathBuf) -> Result<Self, Report> {
        let file = std::fs::File::open(&path).wrap_err_with(|| {
            format!("Failed to open config '{}'", path.display())
        })?;
        let config = ron::de::from_reader(file).wrap_err_with(|| {
            format!("Failed to parse config '{}'", path.display())
        })?;
        Ok(config)
    }

    pub fn build_rig(&self) -> Result<Rig, Report> {
        let config = match &self.rig {
            RigSource::Walking => skeleton::walking(),
            RigSource::Standing => skeleton::standing(),
            RigSource::File(path) => RigConfig::load(path).wrap_err_with(|| {
                format!("Failed to load rig '{}'", path.display())
            })?,
        };

        let rig = config.build()?;
        Ok(rig)
    }
}

fn default_time_step() -> f32 {
    Clocks::DEFAULT_STEP
}

fn default_frame_rate() -> f32 {
    60.0
}

fn default_rig() -> RigSource {
    RigSource::Walking
}

fn default_report_every() -> u64 {
    60
}

fn default_radius() -> f32 {
    8.0
}

fn default_height() -> f32 {
    2.0
}

fn default_orbit_speed() -> f32 {
    0.3
}

fn default_target() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
