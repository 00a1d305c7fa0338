//! Panorama configuration: which scenes exist and where their cube faces
//! come from. Configs are built once at startup and read-only afterwards.

pub const CUBE_FACE_COUNT: usize = 6;

/// Cube map faces in the fixed upload/sample order expected by the
/// renderer: +x, -x, +y, -y, +z, -z.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; CUBE_FACE_COUNT] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Array layer index in the cube texture.
    pub fn layer(self) -> u32 {
        match self {
            CubeFace::PosX => 0,
            CubeFace::NegX => 1,
            CubeFace::PosY => 2,
            CubeFace::NegY => 3,
            CubeFace::PosZ => 4,
            CubeFace::NegZ => 5,
        }
    }

    /// Conventional file name for this face inside a panorama directory.
    pub fn file_name(self) -> &'static str {
        match self {
            CubeFace::PosX => "posx.jpg",
            CubeFace::NegX => "negx.jpg",
            CubeFace::PosY => "posy.jpg",
            CubeFace::NegY => "negy.jpg",
            CubeFace::PosZ => "posz.jpg",
            CubeFace::NegZ => "negz.jpg",
        }
    }
}

/// One named panorama and the six image sources for its cube faces.
#[derive(Clone, Debug)]
pub struct PanoramaConfig {
    pub name: String,
    pub images: [String; CUBE_FACE_COUNT],
}

impl PanoramaConfig {
    pub fn new(name: impl Into<String>, images: [String; CUBE_FACE_COUNT]) -> Self {
        Self {
            name: name.into(),
            images,
        }
    }

    /// Build a config from a directory that holds the conventionally named
    /// face files (`posx.jpg` .. `negz.jpg`).
    pub fn from_dir(name: impl Into<String>, dir: &str) -> Self {
        let dir = dir.trim_end_matches('/');
        let images = CubeFace::ALL.map(|f| format!("{}/{}", dir, f.file_name()));
        Self {
            name: name.into(),
            images,
        }
    }
}

/// The built-in campus scenes.
pub fn builtin_panoramas() -> Vec<PanoramaConfig> {
    vec![
        PanoramaConfig::from_dir(
            "Thousand Hills in Truman",
            "/public/field-skyboxes/FishPond",
        ),
        PanoramaConfig::from_dir("The Quad", "/public/field-skyboxes/Sorsele3"),
    ]
}

/// Narration script for a scene, spoken by the "Listen" affordance.
pub fn narration_for(scene_name: &str) -> Option<&'static str> {
    match scene_name {
        "Thousand Hills in Truman" => Some(
            "Just a short drive west of Kirksville lies the stunning Thousand Hills \
             State Park, a true natural treasure spanning over 3,000 acres with the \
             centerpiece Forest Lake. Created in the early 1950s to supply water for \
             the city, Forest Lake is surrounded by lush woods, savanna landscapes, \
             and a network of hiking and mountain biking trails perfect for outdoor \
             enthusiasts of all levels.",
        ),
        "The Quad" => Some(
            "Welcome to Truman State University's iconic Quad, the vibrant heart of \
             campus life. Once a shimmering lake, this space was transformed in 1924 \
             after a fire at Baldwin Hall drained the water and filled the area with \
             rubble, creating the peaceful grassy oasis you see today. Students flock \
             here in sunny weather to play frisbee, take relaxing hammock naps, and \
             enjoy spontaneous events throughout the year.",
        ),
        _ => None,
    }
}
