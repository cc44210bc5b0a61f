//! ITS-90 reference functions
//!
//! Wr(T90) is defined piecewise around the triple point of water:
//! - 13.8033 K to 273.16 K: `ln Wr = A0 + Σ Ai [(ln(T90/273.16 K) + 1.5) / 1.5]^i`
//! - 273.15 K to 1234.93 K: `Wr = C0 + Σ Ci [(T90/K - 754.15) / 481]^i`
//!
//! The inverse functions (`B` and `D` coefficients) agree with the
//! reference functions to within 0.13 mK.
//!
//! Temperatures at this module's boundary are in degrees Celsius.

use tuscan_core::CalculationError;

/// Triple point of water in kelvin
pub const TPW_KELVIN: f64 = 273.16;

pub const KELVIN_OFFSET: f64 = 273.15;

/// Triple point of equilibrium hydrogen
pub const MIN_KELVIN: f64 = 13.8033;

/// Freezing point of silver
pub const MAX_KELVIN: f64 = 1234.93;

/// Slack on the temperature range for inputs converted from °C
const RANGE_SLACK: f64 = 1e-9;

/// Wr(13.8033 K), rounded down
pub const MIN_WR: f64 = 0.001_190_06;

/// Wr(961.78 °C)
pub const MAX_WR: f64 = 4.286_420_53;

const A: [f64; 13] = [
    -2.135_347_29,
    3.183_247_20,
    -1.801_435_97,
    0.717_272_04,
    0.503_440_27,
    -0.618_993_95,
    -0.053_323_22,
    0.280_213_62,
    0.107_152_24,
    -0.293_028_65,
    0.044_598_72,
    0.118_686_32,
    -0.052_481_34,
];

const B: [f64; 16] = [
    0.183_324_722,
    0.240_975_303,
    0.209_108_771,
    0.190_439_972,
    0.142_648_498,
    0.077_993_465,
    0.012_475_611,
    -0.032_267_127,
    -0.075_291_522,
    -0.056_470_670,
    0.076_201_285,
    0.123_893_204,
    -0.029_201_193,
    -0.091_173_542,
    0.001_317_696,
    0.026_025_526,
];

const C: [f64; 10] = [
    2.781_572_54,
    1.646_509_16,
    -0.137_143_90,
    -0.006_497_67,
    -0.002_344_44,
    0.005_118_68,
    0.001_879_82,
    -0.002_044_72,
    -0.000_461_22,
    0.000_457_24,
];

const D: [f64; 10] = [
    439.932_854,
    472.418_020,
    37.684_494,
    7.472_018,
    2.920_828,
    0.005_184,
    -0.963_864,
    -0.188_732,
    0.191_203,
    0.049_025,
];

/// Evaluate `Σ coefficients[i] x^i` by Horner's rule
pub(crate) fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Reference resistance ratio at `t90` (°C)
pub fn wr(t90: f64) -> Result<f64, CalculationError> {
    let kelvin = t90 + KELVIN_OFFSET;
    if !(MIN_KELVIN - RANGE_SLACK..=MAX_KELVIN + RANGE_SLACK).contains(&kelvin) {
        return Err(CalculationError::OutOfRange {
            quantity: "t90",
            value: t90,
        });
    }

    if kelvin < TPW_KELVIN {
        let x = ((kelvin / TPW_KELVIN).ln() + 1.5) / 1.5;
        Ok(polynomial(&A, x).exp())
    } else {
        let x = (kelvin - 754.15) / 481.0;
        Ok(polynomial(&C, x))
    }
}

/// Temperature (°C) at reference resistance ratio `wr`
pub fn t90r(wr: f64) -> Result<f64, CalculationError> {
    if !(MIN_WR..=MAX_WR).contains(&wr) {
        return Err(CalculationError::OutOfRange {
            quantity: "wr",
            value: wr,
        });
    }

    if wr < 1.0 {
        let x = (wr.powf(1.0 / 6.0) - 0.65) / 0.35;
        Ok(TPW_KELVIN * polynomial(&B, x) - KELVIN_OFFSET)
    } else {
        let x = (wr - 2.64) / 1.64;
        Ok(polynomial(&D, x))
    }
}
