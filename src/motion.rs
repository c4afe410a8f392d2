/// Values below this magnitude are snapped to exactly zero so that
/// floating-point noise never leaks into a near-zero boundary condition.
const SNAP_TOL: f64 = 1e-14;

/// Closed-form kinematics of the imposed base motion: a half-sine-squared
/// velocity pulse with amplitude `A` and rate `B` (period is 2*pi/B).
#[derive(Debug, Clone, Copy)]
pub struct Motion {
    amplitude: f64,
    rate: f64,
}

fn snap(value: f64) -> f64 {
    if value.abs() < SNAP_TOL {
        0.0
    } else {
        value
    }
}

impl Motion {
    pub fn new(amplitude: f64, rate: f64) -> Motion {
        Motion { amplitude, rate }
    }

    /// Imposed displacement at time `t`
    #[allow(unused)]
    pub fn u(&self, t: f64) -> f64 {
        let b = self.rate;
        let u = -(self.amplitude / (4.0 * b)) * ((2.0 * b * t).sin() - 2.0 * b * t);
        snap(u)
    }

    /// Imposed velocity at time `t`
    pub fn v(&self, t: f64) -> f64 {
        let s = (self.rate * t).sin();
        snap(self.amplitude * s * s)
    }

    /// Imposed acceleration at time `t`
    pub fn a(&self, t: f64) -> f64 {
        let bt = self.rate * t;
        snap(2.0 * self.amplitude * self.rate * bt.sin() * bt.cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn velocity_is_half_sine_squared() {
        let b = 4.0 * PI;
        let motion = Motion::new(1.0, b);

        // Peak of the pulse sits at a quarter period
        let t_peak = PI / (2.0 * b);
        assert!((motion.v(t_peak) - 1.0).abs() < 1e-12);

        let t = 0.03;
        assert!((motion.v(t) - (b * t).sin().powi(2)).abs() < 1e-12);
    }

    #[test]
    fn kinematics_snap_to_zero_at_origin() {
        let motion = Motion::new(1.0, 4.0 * PI);

        assert_eq!(motion.u(0.0), 0.0);
        assert_eq!(motion.v(0.0), 0.0);
        assert_eq!(motion.a(0.0), 0.0);
    }

    #[test]
    fn zero_amplitude_is_identically_zero() {
        let motion = Motion::new(0.0, 4.0 * PI);

        for i in 0..100 {
            let t = i as f64 * 0.013;
            assert_eq!(motion.u(t), 0.0);
            assert_eq!(motion.v(t), 0.0);
            assert_eq!(motion.a(t), 0.0);
        }
    }

    #[test]
    fn acceleration_is_velocity_derivative() {
        let motion = Motion::new(2.0, 4.0 * PI);
        let dt = 1e-7;

        for i in 1..20 {
            let t = i as f64 * 0.01;
            let numeric = (motion.v(t + dt) - motion.v(t - dt)) / (2.0 * dt);
            assert!((motion.a(t) - numeric).abs() < 1e-4);
        }
    }
}
