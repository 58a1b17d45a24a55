//! Résolution de la fonction de blend des particules affichées.
//!
//! Les configs d'émetteur portent des facteurs GL bruts. La prémultiplication
//! de la couleur par l'alpha dépend de ces facteurs *et* de la texture, que
//! seul le côté rendu connaît.

pub const GL_ZERO: u32 = 0;
pub const GL_ONE: u32 = 1;
pub const GL_SRC_ALPHA: u32 = 0x0302;
pub const GL_ONE_MINUS_SRC_ALPHA: u32 = 0x0303;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendFunc {
    pub source: u32,
    pub destination: u32,
}

impl BlendFunc {
    pub const fn new(source: u32, destination: u32) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// `dst += src × factor` : les particules s'additionnent (feu, étincelles).
    pub fn is_additive(&self) -> bool {
        self.destination == GL_ONE
    }
}

impl Default for BlendFunc {
    fn default() -> Self {
        Self::new(GL_SRC_ALPHA, GL_ONE_MINUS_SRC_ALPHA)
    }
}

/// État de blend appliqué par le render sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlendSettings {
    pub func: BlendFunc,
    /// Multiplier RGB par l'alpha avant affichage
    pub opacity_modify_rgb: bool,
}

/// `GL_ONE / GL_ONE_MINUS_SRC_ALPHA` attend des couleurs prémultipliées :
/// on garde ce mode si la texture l'est, sinon on repasse en alpha classique.
/// Tout autre couple est conservé tel quel.
pub fn resolve(source: u32, destination: u32, texture_premultiplied: bool) -> BlendSettings {
    let requested = BlendFunc::new(source, destination);

    if requested != BlendFunc::new(GL_ONE, GL_ONE_MINUS_SRC_ALPHA) {
        return BlendSettings {
            func: requested,
            opacity_modify_rgb: false,
        };
    }

    if texture_premultiplied {
        BlendSettings {
            func: requested,
            opacity_modify_rgb: true,
        }
    } else {
        BlendSettings {
            func: BlendFunc::default(),
            opacity_modify_rgb: false,
        }
    }
}
