// Catalog of pixel surfaces referenced by wall cells and sprites.
// The render core samples textures through `TextureId` only.

use std::collections::HashMap;

use crate::renderer::Rgba;

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// CPU-side surface: packed **ARGB** words (0xAARRGGBB) in row-major order.
/// Wall and plane art is usually square at the grid cell size, but any
/// dimensions are legal; the samplers rescale coordinates per texture.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

/// Convenience checkerboard 8×8 (dark/light grey).
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: Rgba = 0xFF_9F9F9F;
        const DARK: Rgba = 0xFF_3A3A3A;
        let mut pix = vec![0u32; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pix[y * 8 + x] = if (x ^ y) & 1 == 0 { LIGHT } else { DARK };
            }
        }
        Texture {
            name: "CHECKER".to_string(),
            w: 8,
            h: 8,
            pixels: pix,
        }
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    /// Pixel vector length disagrees with the declared dimensions.
    #[error("texture `{0}`: pixel count does not match {1}×{2}")]
    SizeMismatch(String, usize, usize),

    /// Texture declares a zero width or height.  The samplers index
    /// `w - 1` / `h - 1`, so a degenerate surface must never be stored.
    #[error("texture `{0}`: zero dimension in {1}×{2}")]
    ZeroSize(String, usize, usize),
}

/// A name-keyed, source-agnostic cache of textures.
///
/// * Does **not** know about PNG files or procedural generators — filling
///   pixel vectors is the caller's job.
/// * Stores exactly one copy of every name.
/// * ID **0** is always the "missing" checkerboard.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Create an empty bank with a mandatory *missing* texture used as
    /// fallback.  The texture is inserted under the fixed name `"MISSING"`
    /// and obtains the handle **0**.  Panics if the fallback itself is
    /// degenerate; it bypasses `insert` and would otherwise reach the
    /// samplers unchecked.
    pub fn new(missing_tex: Texture) -> Self {
        assert!(
            missing_tex.w > 0
                && missing_tex.h > 0
                && missing_tex.pixels.len() == missing_tex.w * missing_tex.h,
            "missing texture must be non-empty, got {}×{} with {} pixels",
            missing_tex.w,
            missing_tex.h,
            missing_tex.pixels.len()
        );
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored (including the "missing" one).
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    } // only checker

    /// Obtain the id for a *loaded* texture by name.
    /// Returns `None` if the name is unknown.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Fallback-safe query: unknown names resolve to the checkerboard id.
    pub fn id_or_missing(&self, name: &str) -> TextureId {
        self.id(name).unwrap_or(NO_TEXTURE)
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`), a dimension is
    ///   zero (`ZeroSize`), or the pixel vector does not cover `w × h`
    ///   (`SizeMismatch`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        if tex.w == 0 || tex.h == 0 {
            return Err(TextureError::ZeroSize(name, tex.w, tex.h));
        }
        if tex.pixels.len() != tex.w * tex.h {
            return Err(TextureError::SizeMismatch(name, tex.w, tex.h));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
