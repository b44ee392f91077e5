//! # Transform Control Bridge
//!
//! Named-property writes from UI widgets into the scene. Widgets address a
//! component as `(property, axis)` rather than poking struct fields, which
//! gives one place to validate values before they land.

use cgmath::Vector3;

use crate::error::VitrineError;
use crate::frame::FrameLoop;
use crate::gfx::resources::material::{Colour, Material};
use crate::gfx::scene::Drawable;

/// Property groups a control widget can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlProperty {
    Position,
    Rotation,
    Scale,
    /// Per-frame animation speed; only X and Y exist.
    RotationSpeed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAxis {
    X,
    Y,
    Z,
}

/// Write `value` to the addressed component.
///
/// Non-finite values are rejected before anything is written, as is the
/// nonexistent Z rotation speed.
pub fn apply_control(
    drawable: &mut Drawable,
    frame: &mut FrameLoop,
    property: ControlProperty,
    axis: ControlAxis,
    value: f32,
) -> Result<(), VitrineError> {
    if !value.is_finite() {
        return Err(VitrineError::NonFiniteControl { value });
    }

    match (property, axis) {
        (ControlProperty::Position, axis) => write_axis(&mut drawable.position, axis, value),
        (ControlProperty::Rotation, axis) => write_axis(&mut drawable.rotation, axis, value),
        (ControlProperty::Scale, axis) => write_axis(&mut drawable.scale, axis, value),
        (ControlProperty::RotationSpeed, ControlAxis::X) => frame.speed_x = value,
        (ControlProperty::RotationSpeed, ControlAxis::Y) => frame.speed_y = value,
        (ControlProperty::RotationSpeed, ControlAxis::Z) => {
            return Err(VitrineError::UnsupportedAxis { property, axis });
        }
    }
    Ok(())
}

fn write_axis(target: &mut Vector3<f32>, axis: ControlAxis, value: f32) {
    match axis {
        ControlAxis::X => target.x = value,
        ControlAxis::Y => target.y = value,
        ControlAxis::Z => target.z = value,
    }
}

/// Parse a hex colour and replace the drawable's material with it.
///
/// On parse failure the material is left untouched and the error describes
/// what was wrong with the text.
pub fn apply_colour(drawable: &mut Drawable, text: &str) -> Result<(), VitrineError> {
    let colour = Colour::from_hex(text)?;
    drawable.set_material(Material::solid(colour));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::GeometryKind;

    fn fixtures() -> (Drawable, FrameLoop) {
        let drawable = Drawable::new(
            "cube",
            GeometryKind::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            Material::solid(Colour::WHITE),
        );
        (drawable, FrameLoop::new())
    }

    #[test]
    fn test_control_round_trip() {
        let (mut drawable, mut frame) = fixtures();

        apply_control(
            &mut drawable,
            &mut frame,
            ControlProperty::Position,
            ControlAxis::X,
            2.5,
        )
        .unwrap();
        assert_eq!(drawable.position.x, 2.5);

        apply_control(
            &mut drawable,
            &mut frame,
            ControlProperty::Rotation,
            ControlAxis::Z,
            -0.75,
        )
        .unwrap();
        assert_eq!(drawable.rotation.z, -0.75);

        apply_control(
            &mut drawable,
            &mut frame,
            ControlProperty::Scale,
            ControlAxis::Y,
            4.0,
        )
        .unwrap();
        assert_eq!(drawable.scale.y, 4.0);
    }

    #[test]
    fn test_rotation_speed_targets_frame_loop() {
        let (mut drawable, mut frame) = fixtures();

        apply_control(
            &mut drawable,
            &mut frame,
            ControlProperty::RotationSpeed,
            ControlAxis::X,
            0.05,
        )
        .unwrap();
        apply_control(
            &mut drawable,
            &mut frame,
            ControlProperty::RotationSpeed,
            ControlAxis::Y,
            -0.02,
        )
        .unwrap();
        assert_eq!(frame.speed_x, 0.05);
        assert_eq!(frame.speed_y, -0.02);
    }

    #[test]
    fn test_rotation_speed_has_no_z_axis() {
        let (mut drawable, mut frame) = fixtures();
        let err = apply_control(
            &mut drawable,
            &mut frame,
            ControlProperty::RotationSpeed,
            ControlAxis::Z,
            0.1,
        )
        .unwrap_err();
        assert!(matches!(err, VitrineError::UnsupportedAxis { .. }));
        assert_eq!(frame.speed_x, 0.01);
        assert_eq!(frame.speed_y, 0.01);
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let (mut drawable, mut frame) = fixtures();
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let err = apply_control(
                &mut drawable,
                &mut frame,
                ControlProperty::Position,
                ControlAxis::X,
                bad,
            )
            .unwrap_err();
            assert!(matches!(err, VitrineError::NonFiniteControl { .. }));
        }
        assert_eq!(drawable.position.x, 0.0);
    }

    #[test]
    fn test_apply_colour() {
        let (mut drawable, _) = fixtures();

        apply_colour(&mut drawable, "#ff8800").unwrap();
        assert_eq!(drawable.material().colour.to_hex(), "#ff8800");
        assert_eq!(drawable.material_revision(), 1);

        // Bad text leaves the material at the last good colour
        assert!(apply_colour(&mut drawable, "#nope").is_err());
        assert_eq!(drawable.material().colour.to_hex(), "#ff8800");
        assert_eq!(drawable.material_revision(), 1);
    }
}
