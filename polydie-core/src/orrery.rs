/// Inner solar system kinematics.
///
/// Bodies move on circular orbits in the XY plane. Each update advances the
/// Earth by a fixed angle and every other body in proportion to its orbital
/// period, so relative speeds stay true to the real ones.
use nalgebra::{Point3, Vector3};

use crate::lighting::Rgb;

/// Length of an Earth year in days
pub const EARTH_PERIOD_DAYS: f32 = 365.26;
/// Scene units per astronomical unit
pub const AU_TO_UNITS: f32 = 10.0;
pub const SUN_RADIUS: f32 = 2.0;
pub const TILT_MIN: f32 = 0.0;
pub const TILT_MAX: f32 = 90.0;

/// A body on a circular orbit
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: &'static str,
    pub color: Rgb,
    pub radius: f32,
    pub orbit_radius: f32,
    pub period_days: f32,
    /// Current orbital angle in degrees
    pub angle: f32,
}

impl Body {
    pub fn new(
        name: &'static str,
        color: Rgb,
        radius: f32,
        orbit_radius: f32,
        period_days: f32,
    ) -> Self {
        Self {
            name,
            color,
            radius,
            orbit_radius,
            period_days,
            angle: 0.0,
        }
    }

    /// Degrees advanced per update, given the Earth's step
    pub fn step_deg(&self, earth_step_deg: f32) -> f32 {
        earth_step_deg * (EARTH_PERIOD_DAYS / self.period_days)
    }

    /// Position relative to the body it orbits
    pub fn offset(&self) -> Vector3<f32> {
        let theta = self.angle.to_radians();
        Vector3::new(theta.cos(), theta.sin(), 0.0) * self.orbit_radius
    }
}

/// Where a body is drawn this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub center: Point3<f32>,
    pub radius: f32,
    pub color: Rgb,
}

/// Sun, planets and the Earth's moon
#[derive(Debug, Clone)]
pub struct Orrery {
    pub planets: Vec<Body>,
    pub moon: Body,
    /// Index of the planet the moon orbits
    pub moon_host: usize,
    /// Earth's advance per update, in degrees
    pub earth_step_deg: f32,
    /// Tilt of the orbital plane towards the viewer, in degrees
    pub tilt: f32,
}

impl Orrery {
    const YELLOW: Rgb = [1.0, 1.0, 0.0];
    const BLUE: Rgb = [0.2, 0.5, 1.0];
    const GREEN: Rgb = [0.1, 0.8, 0.2];
    const RED: Rgb = [1.0, 0.2, 0.2];
    const GREY: Rgb = [0.8, 0.8, 0.85];

    /// Mercury through Mars, sized relative to the Earth
    pub fn inner_planets() -> Self {
        Self {
            planets: vec![
                Body::new("Mercury", Self::RED, 0.38, AU_TO_UNITS * 0.39, 87.97),
                Body::new("Venus", Self::GREEN, 0.95, AU_TO_UNITS * 0.72, 224.70),
                Body::new("Earth", Self::BLUE, 1.00, AU_TO_UNITS * 1.00, 365.26),
                Body::new("Mars", Self::RED, 0.53, AU_TO_UNITS * 1.50, 686.98),
            ],
            moon: Body::new("Moon", Self::GREY, 0.27, 1.5, 27.3),
            moon_host: 2,
            earth_step_deg: 1.0,
            tilt: TILT_MAX,
        }
    }

    /// Advances every body by one update
    pub fn step(&mut self) {
        let earth = self.earth_step_deg;
        for body in self.planets.iter_mut().chain(std::iter::once(&mut self.moon)) {
            body.angle = (body.angle + body.step_deg(earth)).rem_euclid(360.0);
        }
    }

    /// Tilts the orbital plane, clamped to `[TILT_MIN, TILT_MAX]`
    pub fn tilt_by(&mut self, delta: f32) {
        self.tilt = (self.tilt + delta).clamp(TILT_MIN, TILT_MAX);
    }

    /// The sun followed by every planet and then the moon
    pub fn placements(&self) -> Vec<Placement> {
        let sun = Placement {
            center: Point3::origin(),
            radius: SUN_RADIUS,
            color: Self::YELLOW,
        };
        let planets = self.planets.iter().map(|p| Placement {
            center: Point3::from(p.offset()),
            radius: p.radius,
            color: p.color,
        });
        let mut out: Vec<_> = std::iter::once(sun).chain(planets).collect();
        if let Some(host) = self.planets.get(self.moon_host) {
            out.push(Placement {
                center: Point3::from(host.offset() + self.moon.offset()),
                radius: self.moon.radius,
                color: self.moon.color,
            });
        }
        out
    }

    /// Orbit radius of every planet, for drawing the rings
    pub fn orbit_radii(&self) -> impl Iterator<Item = f32> + '_ {
        self.planets.iter().map(|p| p.orbit_radius)
    }
}

impl Default for Orrery {
    fn default() -> Self {
        Self::inner_planets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earth_advances_one_degree() {
        let mut orrery = Orrery::inner_planets();
        orrery.step();
        assert!((orrery.planets[2].angle - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_relative_speeds() {
        let orrery = Orrery::inner_planets();
        let mercury = orrery.planets[0].step_deg(1.0);
        assert!((mercury - 365.26 / 87.97).abs() < 1e-4);
        let moon = orrery.moon.step_deg(1.0);
        assert!((moon - 13.379).abs() < 1e-3);
    }

    #[test]
    fn test_angles_wrap() {
        let mut orrery = Orrery::inner_planets();
        for _ in 0..400 {
            orrery.step();
        }
        assert!(orrery.planets.iter().all(|p| (0.0..360.0).contains(&p.angle)));
        assert!((orrery.planets[2].angle - 40.0).abs() < 1e-2);
    }

    #[test]
    fn test_tilt_is_clamped() {
        let mut orrery = Orrery::inner_planets();
        orrery.tilt_by(10.0);
        assert_eq!(orrery.tilt, TILT_MAX);
        orrery.tilt_by(-200.0);
        assert_eq!(orrery.tilt, TILT_MIN);
    }

    #[test]
    fn test_moon_orbits_earth() {
        let mut orrery = Orrery::inner_planets();
        for _ in 0..17 {
            orrery.step();
        }
        let placements = orrery.placements();
        assert_eq!(placements.len(), 6);
        let earth = placements[3].center;
        let moon = placements[5].center;
        assert!(((moon - earth).norm() - 1.5).abs() < 1e-4);
        assert!((earth.coords.norm() - AU_TO_UNITS).abs() < 1e-4);
    }
}
