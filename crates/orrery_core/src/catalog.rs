//! The fixed solar system
//!
//! Distances and sizes are chosen to look good on screen, not to scale.
//! Parents are listed before their satellites.

use crate::body::{BodyDesc, BodyKind};
use crate::sphere::SphereDetail;

const fn planet(
    name: &'static str,
    orbit_radius: f32,
    orbit_speed: f32,
    spin_speed: f32,
    scale: f32,
    texture: &'static str,
    fallback_color: [u8; 4],
) -> BodyDesc {
    BodyDesc {
        name,
        kind: BodyKind::Planet,
        parent: None,
        orbit_radius,
        orbit_speed,
        spin_speed,
        scale,
        detail: SphereDetail::High,
        texture,
        fallback_color,
    }
}

const fn moon(
    name: &'static str,
    parent: &'static str,
    orbit_radius: f32,
    orbit_speed: f32,
    spin_speed: f32,
    texture: &'static str,
    fallback_color: [u8; 4],
) -> BodyDesc {
    BodyDesc {
        name,
        kind: BodyKind::Moon,
        parent: Some(parent),
        orbit_radius,
        orbit_speed,
        spin_speed,
        scale: 0.6,
        detail: SphereDetail::Low,
        texture,
        fallback_color,
    }
}

/// Sun, eight planets, Pluto and the moons that get drawn
pub const STANDARD_CATALOG: &[BodyDesc] = &[
    BodyDesc {
        name: "Sun",
        kind: BodyKind::Star,
        parent: None,
        orbit_radius: 0.0,
        orbit_speed: 0.0,
        spin_speed: 0.5,
        scale: 5.0,
        detail: SphereDetail::High,
        texture: "8k_sun.jpg",
        fallback_color: [255, 200, 64, 255],
    },
    planet("Mercury", 7.8, 1.0, 0.5, 0.9, "2k_mercury.jpg", [150, 140, 130, 255]),
    planet("Venus", 22.7, 0.9, 0.8, 1.0, "2k_venus_surface.jpg", [220, 180, 110, 255]),
    planet("Earth", -25.0, 0.8, 1.3, 1.0, "earth2048.bmp", [60, 100, 200, 255]),
    BodyDesc {
        name: "Moon",
        kind: BodyKind::Moon,
        parent: Some("Earth"),
        orbit_radius: 3.0,
        orbit_speed: 1.0,
        spin_speed: 0.5,
        scale: 0.4,
        detail: SphereDetail::High,
        texture: "moon1024.bmp",
        fallback_color: [190, 190, 190, 255],
    },
    planet("Mars", -35.0, 0.5, 1.0, 1.0, "2k_mars.jpg", [190, 80, 40, 255]),
    moon("Phobos", "Mars", 6.0, 2.0, 0.5, "phobos.jpg", [120, 110, 100, 255]),
    moon("Deimos", "Mars", 10.0, 1.5, 0.5, "deimos.jpg", [140, 130, 115, 255]),
    planet("Jupiter", 48.0, 0.4, 3.0, 2.5, "2k_jupiter.jpg", [200, 160, 120, 255]),
    moon("Io", "Jupiter", 5.0, 2.5, 0.5, "lo.jpg", [220, 200, 90, 255]),
    moon("Europa", "Jupiter", 7.5, 2.0, 0.5, "Europa.jpg", [200, 190, 170, 255]),
    moon("Ganymede", "Jupiter", 10.0, 1.5, 0.5, "Ganymede.jpg", [150, 140, 130, 255]),
    moon("Callisto", "Jupiter", 12.5, 1.0, 0.5, "Callisto.jpg", [100, 90, 80, 255]),
    planet("Saturn", -58.0, 0.3, 2.7, 2.0, "saturn.jpg", [210, 190, 140, 255]),
    moon("Titan", "Saturn", 10.0, 1.2, 0.5, "Titan.jpg", [210, 160, 80, 255]),
    moon("Enceladus", "Saturn", 8.0, 1.8, 0.5, "Enceladus.jpg", [240, 240, 240, 255]),
    planet("Uranus", 68.0, 0.2, 2.0, 1.5, "2k_uranus.jpg", [150, 210, 220, 255]),
    moon("Miranda", "Uranus", 5.0, 1.6, 0.5, "Miranda.jpg", [170, 170, 170, 255]),
    moon("Titania", "Uranus", 8.0, 1.1, 0.5, "Titania.jpg", [160, 150, 145, 255]),
    planet("Neptune", -75.0, 0.1, 2.5, 1.5, "2k_neptune.jpg", [60, 90, 220, 255]),
    moon("Triton", "Neptune", 6.0, 1.3, 0.5, "triton.jpg", [200, 190, 185, 255]),
    BodyDesc {
        name: "Pluto",
        kind: BodyKind::DwarfPlanet,
        parent: None,
        orbit_radius: -85.0,
        orbit_speed: 0.07,
        spin_speed: 0.3,
        scale: 0.6,
        detail: SphereDetail::High,
        texture: "pluto.jpg",
        fallback_color: [200, 170, 140, 255],
    },
    moon("Charon", "Pluto", 6.0, 1.0, 0.5, "Charon.jpg", [130, 125, 120, 255]),
];
