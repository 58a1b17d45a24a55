#[cfg(debug_assertions)]
use log::debug;
use log::warn;

use bytemuck::{Pod, Zeroable};

use crate::emitter_engine::particle::Particle;
use crate::emitter_engine::types::{Color, Vec2};
use crate::render_sink::blend::BlendSettings;
use crate::render_sink::RenderSink;

/// Une sprite par slot du pool, cachée par défaut.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sprite {
    pub visible: bool,
    pub position: Vec2,
    /// Largeur et hauteur (sprites carrées)
    pub size: f32,
    pub color: Color,
    /// Radians, convertis depuis les degrés de la particule
    pub rotation: f32,
}

/// Données d'instance d'une sprite visible, au format d'un vertex buffer GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub pos_x: f32,
    pub pos_y: f32,
    pub size: f32,
    pub rotation: f32,
    pub col_r: f32,
    pub col_g: f32,
    pub col_b: f32,
    pub col_a: f32,
}

impl From<&Sprite> for SpriteInstance {
    fn from(s: &Sprite) -> Self {
        Self {
            pos_x: s.position.x,
            pos_y: s.position.y,
            size: s.size,
            rotation: s.rotation,
            col_r: s.color.x,
            col_g: s.color.y,
            col_b: s.color.z,
            col_a: s.color.w,
        }
    }
}

/// Render sink CPU tenu en phase avec le pool d'un émetteur.
///
/// Les sprites sont pré-allouées (une par slot). Un spawn révèle la sprite
/// suivante, une suppression cache la dernière sprite visible : les slots
/// `[0, visible)` correspondent toujours aux particules vivantes, et `sync`
/// recopie leur état à chaque frame.
///
/// Si la banque est plus petite que le pool, les particules en trop ne sont
/// pas affichées : elles sont comptées dans `overflow`, et une suppression
/// consomme d'abord ce surplus avant de cacher une sprite.
#[derive(Debug, Clone)]
pub struct SpriteBank {
    sprites: Vec<Sprite>,
    visible: usize,
    overflow: usize,
    blend: BlendSettings,
}

impl SpriteBank {
    pub fn new(capacity: usize) -> Self {
        Self::with_blend(capacity, BlendSettings::default())
    }

    pub fn with_blend(capacity: usize, blend: BlendSettings) -> Self {
        #[cfg(debug_assertions)]
        debug!(
            "SpriteBank initialized with {} sprites (blend {:?})",
            capacity, blend
        );

        Self {
            sprites: vec![Sprite::default(); capacity],
            visible: 0,
            overflow: 0,
            blend,
        }
    }

    #[inline]
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    /// Particules vivantes sans sprite (banque trop petite).
    #[inline]
    pub fn overflow_count(&self) -> usize {
        self.overflow
    }

    #[inline]
    pub fn blend(&self) -> BlendSettings {
        self.blend
    }

    /// Toutes les sprites, visibles ou non.
    #[inline]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    #[inline]
    pub fn visible_sprites(&self) -> &[Sprite] {
        &self.sprites[..self.visible]
    }

    /// Recopie position, taille, couleur et rotation depuis les particules vivantes.
    pub fn sync(&mut self, particles: &[Particle]) {
        debug_assert_eq!(
            particles.len(),
            self.visible + self.overflow,
            "sprite bank out of step with the particle pool"
        );

        let premultiply = self.blend.opacity_modify_rgb;
        let shown = self.visible.min(particles.len());
        for (sprite, p) in self.sprites[..shown].iter_mut().zip(particles) {
            sprite.position = p.position;
            sprite.size = p.size;
            sprite.rotation = p.rotation.to_radians();
            sprite.color = if premultiply {
                (p.color.truncate() * p.color.w).extend(p.color.w)
            } else {
                p.color
            };
        }
    }

    /// Cache toutes les sprites et oublie le surplus.
    pub fn hide_all(&mut self) {
        self.sprites[..self.visible]
            .iter_mut()
            .for_each(|s| s.visible = false);
        self.visible = 0;
        self.overflow = 0;
    }

    /// Remplit `out` avec les sprites visibles, retourne le nombre écrit.
    pub fn fill_instance_slice(&self, out: &mut [SpriteInstance]) -> usize {
        let n = self.visible.min(out.len());
        for (dst, sprite) in out.iter_mut().zip(&self.sprites[..n]) {
            *dst = SpriteInstance::from(sprite);
        }
        n
    }
}

impl RenderSink for SpriteBank {
    fn particle_spawned(&mut self) {
        match self.sprites.get_mut(self.visible) {
            Some(sprite) => {
                sprite.visible = true;
                self.visible += 1;
            }
            None => {
                if self.overflow == 0 {
                    warn!(
                        "SpriteBank full ({} sprites): extra particles won't be shown",
                        self.sprites.len()
                    );
                }
                self.overflow += 1;
            }
        }
    }

    fn particle_removed(&mut self, index: usize) {
        debug_assert!(
            index < self.visible + self.overflow,
            "removed index {index} was not live"
        );
        // Le pool garde au moins `visible` particules : rien à cacher
        if self.overflow > 0 {
            self.overflow -= 1;
            return;
        }
        if self.visible == 0 {
            warn!("SpriteBank: removal of {index} with no visible sprite ignored");
            return;
        }
        self.visible -= 1;
        self.sprites[self.visible].visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_sink::blend::{resolve, GL_ONE, GL_ONE_MINUS_SRC_ALPHA};

    fn particle(x: f32, color: Color) -> Particle {
        Particle {
            position: Vec2::new(x, 0.0),
            size: 8.0,
            rotation: 180.0,
            color,
            time_to_live: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_spawn_and_remove_toggle_visibility() {
        let mut bank = SpriteBank::new(3);
        bank.particle_spawned();
        bank.particle_spawned();
        assert_eq!(bank.visible_count(), 2);
        assert!(bank.sprites()[1].visible);
        assert!(!bank.sprites()[2].visible);

        bank.particle_removed(0);
        assert_eq!(bank.visible_count(), 1);
        assert!(bank.sprites()[0].visible);
        assert!(!bank.sprites()[1].visible);
    }

    #[test]
    fn test_spawn_beyond_capacity_counts_overflow() {
        let mut bank = SpriteBank::new(1);
        bank.particle_spawned();
        bank.particle_spawned();
        assert_eq!(bank.visible_count(), 1);
        assert_eq!(bank.overflow_count(), 1);

        // Le surplus part en premier, la sprite reste affichée
        bank.particle_removed(1);
        assert_eq!(bank.overflow_count(), 0);
        assert_eq!(bank.visible_count(), 1);
        assert!(bank.sprites()[0].visible);

        bank.particle_removed(0);
        assert_eq!(bank.visible_count(), 0);
    }

    #[test]
    fn test_undersized_bank_syncs_visible_prefix() {
        let mut bank = SpriteBank::new(2);
        for _ in 0..3 {
            bank.particle_spawned();
        }
        bank.sync(&[
            particle(1.0, Color::ONE),
            particle(2.0, Color::ONE),
            particle(3.0, Color::ONE),
        ]);

        let xs: Vec<f32> = bank.visible_sprites().iter().map(|s| s.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);

        bank.hide_all();
        assert_eq!(bank.visible_count(), 0);
        assert_eq!(bank.overflow_count(), 0);
        assert!(bank.sprites().iter().all(|s| !s.visible));
    }

    #[test]
    fn test_sync_copies_particle_state() {
        let mut bank = SpriteBank::new(2);
        bank.particle_spawned();
        bank.particle_spawned();

        let particles = [
            particle(1.0, Color::new(1.0, 0.5, 0.0, 0.5)),
            particle(2.0, Color::ONE),
        ];
        bank.sync(&particles);

        let s = bank.visible_sprites();
        assert_eq!(s[0].position, Vec2::new(1.0, 0.0));
        assert_eq!(s[1].position, Vec2::new(2.0, 0.0));
        assert_eq!(s[0].size, 8.0);
        assert!((s[0].rotation - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(s[0].color, Color::new(1.0, 0.5, 0.0, 0.5));
    }

    #[test]
    fn test_sync_premultiplies_when_required() {
        let mut bank = SpriteBank::with_blend(1, resolve(GL_ONE, GL_ONE_MINUS_SRC_ALPHA, true));
        bank.particle_spawned();
        bank.sync(&[particle(0.0, Color::new(1.0, 0.5, 0.2, 0.5))]);

        let c = bank.visible_sprites()[0].color;
        assert!((c - Color::new(0.5, 0.25, 0.1, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_instances_are_plain_bytes() {
        let mut bank = SpriteBank::new(4);
        bank.particle_spawned();
        bank.particle_spawned();
        bank.sync(&[particle(3.0, Color::ONE), particle(4.0, Color::ONE)]);

        let mut out = vec![SpriteInstance::default(); 4];
        let n = bank.fill_instance_slice(&mut out);
        assert_eq!(n, 2);
        assert_eq!(out[1].pos_x, 4.0);
        assert_eq!(out[2], SpriteInstance::default());

        let bytes: &[u8] = bytemuck::cast_slice(&out[..n]);
        assert_eq!(bytes.len(), 2 * 8 * std::mem::size_of::<f32>());
    }
}
