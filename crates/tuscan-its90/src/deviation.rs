//! ITS-90 deviation functions
//!
//! A calibrated thermometer's resistance ratio W differs from the reference
//! ratio Wr by a deviation ΔW = W - Wr whose form depends on the subrange
//! the thermometer was calibrated over. Coefficients that were not supplied
//! count as zero.

use tuscan_core::{ArgName, CalculationError, CalibrationArgs};

/// Calibration subranges, numbered as in the request `subrange` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subrange {
    /// 13.8033 K to 273.16 K
    EHydrogenToTpw = 1,
    /// 24.5561 K to 273.16 K
    NeonToTpw = 2,
    /// 54.3584 K to 273.16 K
    OxygenToTpw = 3,
    /// 83.8058 K to 273.16 K
    ArgonToTpw = 4,
    /// 0 °C to 961.78 °C
    ZeroToSilver = 5,
    /// 0 °C to 660.323 °C
    ZeroToAluminium = 6,
    /// 0 °C to 419.527 °C
    ZeroToZinc = 7,
    /// 0 °C to 231.928 °C
    ZeroToTin = 8,
    /// 0 °C to 156.5985 °C
    ZeroToIndium = 9,
    /// 0 °C to 29.7646 °C
    ZeroToGallium = 10,
    /// -38.8344 °C to 29.7646 °C
    MercuryToGallium = 11,
}

impl Subrange {
    /// Interpret a coerced `subrange` argument
    pub fn from_value(value: f64) -> Result<Self, CalculationError> {
        if value.fract() != 0.0 {
            return Err(CalculationError::UnsupportedSubrange(value));
        }

        let subrange = match value as i64 {
            1 => Subrange::EHydrogenToTpw,
            2 => Subrange::NeonToTpw,
            3 => Subrange::OxygenToTpw,
            4 => Subrange::ArgonToTpw,
            5 => Subrange::ZeroToSilver,
            6 => Subrange::ZeroToAluminium,
            7 => Subrange::ZeroToZinc,
            8 => Subrange::ZeroToTin,
            9 => Subrange::ZeroToIndium,
            10 => Subrange::ZeroToGallium,
            11 => Subrange::MercuryToGallium,
            _ => return Err(CalculationError::UnsupportedSubrange(value)),
        };

        Ok(subrange)
    }

    /// Whether the deviation function takes `ln W`, which needs W > 0
    fn uses_log(&self) -> bool {
        matches!(
            self,
            Subrange::EHydrogenToTpw
                | Subrange::NeonToTpw
                | Subrange::OxygenToTpw
                | Subrange::ArgonToTpw
        )
    }
}

/// Deviation function of one calibrated thermometer
#[derive(Debug, Clone, PartialEq)]
pub struct Deviation {
    subrange: Subrange,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    w660: Option<f64>,
    c_n: [f64; 5],
}

impl Deviation {
    /// Build from a bundle; `subrange` must be present
    pub fn from_args(args: &CalibrationArgs) -> Result<Self, CalculationError> {
        let subrange = args
            .get(ArgName::Subrange)
            .ok_or_else(|| CalculationError::InvalidArgument {
                name: "subrange",
                reason: "missing".to_string(),
            })
            .and_then(Subrange::from_value)?;

        Ok(Self {
            subrange,
            a: args.coefficient(ArgName::A),
            b: args.coefficient(ArgName::B),
            c: args.coefficient(ArgName::C),
            d: args.coefficient(ArgName::D),
            w660: args.get(ArgName::W660),
            c_n: [
                args.coefficient(ArgName::C1),
                args.coefficient(ArgName::C2),
                args.coefficient(ArgName::C3),
                args.coefficient(ArgName::C4),
                args.coefficient(ArgName::C5),
            ],
        })
    }

    /// ΔW at measured resistance ratio `w`
    pub fn delta_w(&self, w: f64) -> Result<f64, CalculationError> {
        if self.subrange.uses_log() && w <= 0.0 {
            return Err(CalculationError::InvalidArgument {
                name: "w",
                reason: format!("resistance ratio must be positive, got {}", w),
            });
        }

        let x = w - 1.0;
        let quadratic = self.a * x + self.b * x * x;

        let delta = match self.subrange {
            Subrange::EHydrogenToTpw => quadratic + log_series(w, &self.c_n, 2),
            Subrange::NeonToTpw => quadratic + log_series(w, &self.c_n[..3], 0),
            Subrange::OxygenToTpw => quadratic + log_series(w, &self.c_n[..1], 1),
            Subrange::ArgonToTpw => self.a * x + self.b * x * w.ln(),
            Subrange::ZeroToSilver => {
                let mut delta = quadratic + self.c * x.powi(3);
                if let Some(w660) = self.w660 {
                    if w > w660 {
                        delta += self.d * (w - w660).powi(2);
                    }
                }
                delta
            }
            Subrange::ZeroToAluminium => quadratic + self.c * x.powi(3),
            Subrange::ZeroToZinc | Subrange::ZeroToTin | Subrange::MercuryToGallium => quadratic,
            Subrange::ZeroToIndium | Subrange::ZeroToGallium => self.a * x,
        };

        Ok(delta)
    }
}

/// `Σ c_i (ln w)^(i + n)` for i starting at 1
fn log_series(w: f64, coefficients: &[f64], n: i32) -> f64 {
    let ln_w = w.ln();
    coefficients
        .iter()
        .zip(1..)
        .map(|(c, i)| c * ln_w.powi(i + n))
        .sum()
}
