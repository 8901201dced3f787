use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::catalog::rgb;

const NEON_COLORS: [u32; 4] = [0xff00ff, 0x00ffff, 0xffff00, 0xff0000];

/// Pulsing point light. Intensity is a pure function of elapsed time so two
/// hosts started together stay in phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeonLight {
    pub color: [f32; 3],
    pub position: Vec3,
    pub phase: f32,
    pub range: f32,
    pub intensity: f32,
}

impl NeonLight {
    pub fn intensity_at(&self, elapsed_secs: f64, rate: f32) -> f32 {
        let angle = elapsed_secs * f64::from(rate) + f64::from(self.phase);
        (0.5 + 0.5 * angle.sin()) as f32
    }

    pub fn animate(&mut self, elapsed_secs: f64, rate: f32) {
        self.intensity = self.intensity_at(elapsed_secs, rate);
    }
}

/// Four lights evenly spaced on a ring around `center`, each a quarter turn
/// and one radian of phase apart from the previous.
pub fn neon_ring(center: Vec3, radius: f32, height: f32) -> Vec<NeonLight> {
    NEON_COLORS
        .iter()
        .enumerate()
        .map(|(index, &color)| {
            let angle = index as f32 * FRAC_PI_2;
            NeonLight {
                color: rgb(color),
                position: Vec3::new(
                    center.x + angle.cos() * radius,
                    height,
                    center.z + angle.sin() * radius,
                ),
                phase: index as f32,
                range: 10.0,
                intensity: 1.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_follows_phase_shifted_sine() {
        let lights = neon_ring(Vec3::ZERO, 20.0, 3.0);
        assert!((lights[0].intensity_at(0.0, 1.0) - 0.5).abs() < 1e-6);
        let expected = 0.5 + 0.5 * (2.5f64 + 1.0).sin();
        assert!((lights[1].intensity_at(2.5, 1.0) as f64 - expected).abs() < 1e-6);
    }

    #[test]
    fn intensity_stays_in_unit_range() {
        let mut light = neon_ring(Vec3::ZERO, 20.0, 3.0)[3];
        for step in 0..2_000 {
            light.animate(step as f64 * 0.013, 1.0);
            assert!((0.0..=1.0).contains(&light.intensity));
        }
    }

    #[test]
    fn ring_spacing() {
        let lights = neon_ring(Vec3::ZERO, 20.0, 3.0);
        assert_eq!(lights.len(), 4);
        assert!((lights[0].position - Vec3::new(20.0, 3.0, 0.0)).length() < 1e-4);
        assert!((lights[1].position - Vec3::new(0.0, 3.0, 20.0)).length() < 1e-4);
    }
}
