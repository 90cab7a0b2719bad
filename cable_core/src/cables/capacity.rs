//! # Current-Carrying Capacity Tables
//!
//! Tabulated ratings It (A) per construction, size and reference method,
//! for conductors at 30°C ambient, one circuit, before correction.
//!
//! A `0.0` entry means the construction is not rated for that method. In
//! that case [`capacity`] falls back to the method C (clipped direct)
//! rating scaled by [`installation_method_factor`].
//!
//! Twin-and-earth and single-core XLPE use the 70°C ratings: the conductor
//! temperature is limited by the accessories they terminate in. Their
//! higher insulation class still earns the 90°C temperature correction.

use serde::{Deserialize, Serialize};

use super::derating::installation_method_factor;
use super::methods::InstallationMethod;
use super::sizes::ConductorSize;
use super::types::CableType;

/// One table row: size and ratings in [`InstallationMethod::column`] order
pub type CapacityRow = (ConductorSize, [f64; 10]);

/// Flat twin and earth, Table 4D5 style ratings
static PVC_TWIN_EARTH: &[CapacityRow] = &[
    //                       A1     A2     B1     B2     C      D1     D2     E      F      G
    (ConductorSize::Mm1_0,  [ 11.0,  13.0,  13.0,  16.0,  20.0,   0.0,   0.0,  22.0,   0.0,   0.0]),
    (ConductorSize::Mm1_5,  [ 14.0,  16.0,  17.0,  20.0,  26.0,   0.0,   0.0,  29.0,   0.0,   0.0]),
    (ConductorSize::Mm2_5,  [ 18.0,  21.0,  23.0,  27.0,  36.0,   0.0,   0.0,  39.0,   0.0,   0.0]),
    (ConductorSize::Mm4,    [ 24.0,  28.0,  30.0,  36.0,  49.0,   0.0,   0.0,  53.0,   0.0,   0.0]),
    (ConductorSize::Mm6,    [ 31.0,  36.0,  38.0,  46.0,  62.0,   0.0,   0.0,  69.0,   0.0,   0.0]),
    (ConductorSize::Mm10,   [ 42.0,  50.0,  52.0,  63.0,  85.0,   0.0,   0.0,  94.0,   0.0,   0.0]),
];

/// Single-core cables in conduit/trunking or on tray
static PVC_SINGLE: &[CapacityRow] = &[
    //                       A1     A2     B1     B2     C      D1     D2     E      F      G
    (ConductorSize::Mm1_0,  [ 13.0,  15.0,  16.0,  19.0,  24.0,   0.0,   0.0,  26.0,  25.0,  28.0]),
    (ConductorSize::Mm1_5,  [ 16.0,  19.0,  20.0,  24.0,  31.0,   0.0,   0.0,  34.0,  32.0,  36.0]),
    (ConductorSize::Mm2_5,  [ 22.0,  26.0,  28.0,  33.0,  42.0,   0.0,   0.0,  46.0,  44.0,  49.0]),
    (ConductorSize::Mm4,    [ 29.0,  34.0,  37.0,  44.0,  56.0,   0.0,   0.0,  61.0,  58.0,  65.0]),
    (ConductorSize::Mm6,    [ 37.0,  44.0,  47.0,  56.0,  71.0,   0.0,   0.0,  78.0,  74.0,  83.0]),
    (ConductorSize::Mm10,   [ 51.0,  60.0,  64.0,  76.0,  96.0,   0.0,   0.0, 105.0, 100.0, 112.0]),
    (ConductorSize::Mm16,   [ 68.0,  80.0,  85.0, 101.0, 128.0,   0.0,   0.0, 140.0, 133.0, 149.0]),
    (ConductorSize::Mm25,   [ 89.0, 105.0, 112.0, 133.0, 168.0,   0.0,   0.0, 184.0, 175.0, 196.0]),
    (ConductorSize::Mm35,   [110.0, 130.0, 138.0, 164.0, 207.0,   0.0,   0.0, 227.0, 216.0, 242.0]),
    (ConductorSize::Mm50,   [134.0, 158.0, 168.0, 200.0, 252.0,   0.0,   0.0, 276.0, 263.0, 294.0]),
    (ConductorSize::Mm70,   [171.0, 203.0, 216.0, 257.0, 324.0,   0.0,   0.0, 355.0, 338.0, 378.0]),
    (ConductorSize::Mm95,   [209.0, 247.0, 263.0, 312.0, 393.0,   0.0,   0.0, 431.0, 410.0, 458.0]),
    (ConductorSize::Mm120,  [241.0, 285.0, 304.0, 361.0, 454.0,   0.0,   0.0, 498.0, 474.0, 530.0]),
    (ConductorSize::Mm150,  [275.0, 325.0, 347.0, 412.0, 519.0,   0.0,   0.0, 569.0, 542.0, 606.0]),
    (ConductorSize::Mm185,  [314.0, 371.0, 396.0, 470.0, 593.0,   0.0,   0.0, 650.0, 619.0, 692.0]),
    (ConductorSize::Mm240,  [364.0, 430.0, 459.0, 545.0, 687.0,   0.0,   0.0, 754.0, 717.0, 802.0]),
    (ConductorSize::Mm300,  [419.0, 495.0, 528.0, 627.0, 792.0,   0.0,   0.0, 868.0, 826.0, 924.0]),
    (ConductorSize::Mm400,  [486.0, 574.0, 613.0, 727.0, 918.0,   0.0,   0.0, 1007.0, 958.0, 1072.0]),
];

/// FP200-class fire-resistant cable
static FIRE_RESISTANT: &[CapacityRow] = &[
    //                       A1     A2     B1     B2     C      D1     D2     E      F      G
    (ConductorSize::Mm1_5,  [ 19.0,  22.0,  23.0,  28.0,  35.0,   0.0,   0.0,  39.0,  37.0,   0.0]),
    (ConductorSize::Mm2_5,  [ 25.0,  30.0,  32.0,  38.0,  48.0,   0.0,   0.0,  53.0,  50.0,   0.0]),
    (ConductorSize::Mm4,    [ 33.0,  39.0,  42.0,  50.0,  64.0,   0.0,   0.0,  70.0,  67.0,   0.0]),
    (ConductorSize::Mm6,    [ 43.0,  51.0,  54.0,  64.0,  81.0,   0.0,   0.0,  89.0,  85.0,   0.0]),
    (ConductorSize::Mm10,   [ 58.0,  69.0,  73.0,  87.0, 110.0,   0.0,   0.0, 121.0, 115.0,   0.0]),
    (ConductorSize::Mm16,   [ 78.0,  92.0,  98.0, 116.0, 147.0,   0.0,   0.0, 161.0, 153.0,   0.0]),
    (ConductorSize::Mm25,   [102.0, 121.0, 128.0, 152.0, 193.0,   0.0,   0.0, 212.0, 201.0,   0.0]),
    (ConductorSize::Mm35,   [126.0, 149.0, 158.0, 188.0, 238.0,   0.0,   0.0, 261.0, 248.0,   0.0]),
    (ConductorSize::Mm50,   [154.0, 182.0, 193.0, 230.0, 290.0,   0.0,   0.0, 318.0, 302.0,   0.0]),
    (ConductorSize::Mm70,   [196.0, 233.0, 248.0, 295.0, 372.0,   0.0,   0.0, 408.0, 388.0,   0.0]),
    (ConductorSize::Mm95,   [240.0, 284.0, 302.0, 359.0, 452.0,   0.0,   0.0, 496.0, 471.0,   0.0]),
    (ConductorSize::Mm120,  [277.0, 328.0, 349.0, 415.0, 522.0,   0.0,   0.0, 573.0, 544.0,   0.0]),
    (ConductorSize::Mm150,  [316.0, 374.0, 398.0, 473.0, 596.0,   0.0,   0.0, 654.0, 622.0,   0.0]),
    (ConductorSize::Mm185,  [361.0, 427.0, 455.0, 540.0, 681.0,   0.0,   0.0, 747.0, 711.0,   0.0]),
    (ConductorSize::Mm240,  [419.0, 495.0, 527.0, 627.0, 790.0,   0.0,   0.0, 867.0, 825.0,   0.0]),
];

/// Multicore XLPE/SWA
static SWA_XLPE: &[CapacityRow] = &[
    //                       A1     A2     B1     B2     C      D1     D2     E      F      G
    (ConductorSize::Mm1_5,  [  0.0,   0.0,   0.0,   0.0,  32.0,  25.0,  27.0,  36.0,  34.0,  38.0]),
    (ConductorSize::Mm2_5,  [  0.0,   0.0,   0.0,   0.0,  43.0,  33.0,  36.0,  48.0,  46.0,  51.0]),
    (ConductorSize::Mm4,    [  0.0,   0.0,   0.0,   0.0,  57.0,  44.0,  48.0,  64.0,  61.0,  68.0]),
    (ConductorSize::Mm6,    [  0.0,   0.0,   0.0,   0.0,  73.0,  56.0,  61.0,  82.0,  78.0,  87.0]),
    (ConductorSize::Mm10,   [  0.0,   0.0,   0.0,   0.0,  98.0,  75.0,  81.0, 110.0, 105.0, 117.0]),
    (ConductorSize::Mm16,   [  0.0,   0.0,   0.0,   0.0, 131.0, 100.0, 108.0, 147.0, 140.0, 156.0]),
    (ConductorSize::Mm25,   [  0.0,   0.0,   0.0,   0.0, 168.0, 128.0, 138.0, 189.0, 180.0, 200.0]),
    (ConductorSize::Mm35,   [  0.0,   0.0,   0.0,   0.0, 201.0, 153.0, 165.0, 226.0, 215.0, 239.0]),
    (ConductorSize::Mm50,   [  0.0,   0.0,   0.0,   0.0, 242.0, 184.0, 198.0, 272.0, 259.0, 288.0]),
    (ConductorSize::Mm70,   [  0.0,   0.0,   0.0,   0.0, 310.0, 236.0, 254.0, 348.0, 331.0, 368.0]),
    (ConductorSize::Mm95,   [  0.0,   0.0,   0.0,   0.0, 375.0, 285.0, 307.0, 421.0, 400.0, 445.0]),
    (ConductorSize::Mm120,  [  0.0,   0.0,   0.0,   0.0, 431.0, 328.0, 353.0, 484.0, 460.0, 512.0]),
    (ConductorSize::Mm150,  [  0.0,   0.0,   0.0,   0.0, 491.0, 374.0, 402.0, 551.0, 524.0, 583.0]),
    (ConductorSize::Mm185,  [  0.0,   0.0,   0.0,   0.0, 557.0, 424.0, 456.0, 625.0, 594.0, 661.0]),
    (ConductorSize::Mm240,  [  0.0,   0.0,   0.0,   0.0, 641.0, 488.0, 525.0, 720.0, 684.0, 762.0]),
    (ConductorSize::Mm300,  [  0.0,   0.0,   0.0,   0.0, 738.0, 562.0, 605.0, 829.0, 788.0, 877.0]),
    (ConductorSize::Mm400,  [  0.0,   0.0,   0.0,   0.0, 855.0, 651.0, 701.0, 960.0, 912.0, 1015.0]),
];

/// Mineral-insulated, exposed to touch
static MICC: &[CapacityRow] = &[
    //                       A1     A2     B1     B2     C      D1     D2     E      F      G
    (ConductorSize::Mm1_0,  [  0.0,   0.0,   0.0,   0.0,  28.0,   0.0,   0.0,  32.0,  30.0,   0.0]),
    (ConductorSize::Mm1_5,  [  0.0,   0.0,   0.0,   0.0,  37.0,   0.0,   0.0,  42.0,  40.0,   0.0]),
    (ConductorSize::Mm2_5,  [  0.0,   0.0,   0.0,   0.0,  50.0,   0.0,   0.0,  57.0,  54.0,   0.0]),
    (ConductorSize::Mm4,    [  0.0,   0.0,   0.0,   0.0,  68.0,   0.0,   0.0,  77.0,  73.0,   0.0]),
    (ConductorSize::Mm6,    [  0.0,   0.0,   0.0,   0.0,  87.0,   0.0,   0.0,  98.0,  93.0,   0.0]),
    (ConductorSize::Mm10,   [  0.0,   0.0,   0.0,   0.0, 118.0,   0.0,   0.0, 134.0, 127.0,   0.0]),
    (ConductorSize::Mm16,   [  0.0,   0.0,   0.0,   0.0, 157.0,   0.0,   0.0, 178.0, 169.0,   0.0]),
    (ConductorSize::Mm25,   [  0.0,   0.0,   0.0,   0.0, 202.0,   0.0,   0.0, 229.0, 217.0,   0.0]),
];

/// Aluminium XLPE/SWA
static ALUMINIUM_XLPE: &[CapacityRow] = &[
    //                       A1     A2     B1     B2     C      D1     D2     E      F      G
    (ConductorSize::Mm16,   [  0.0,   0.0,   0.0,   0.0, 102.0,  78.0,  84.0, 114.0, 109.0, 121.0]),
    (ConductorSize::Mm25,   [  0.0,   0.0,   0.0,   0.0, 131.0,  99.0, 107.0, 147.0, 140.0, 156.0]),
    (ConductorSize::Mm35,   [  0.0,   0.0,   0.0,   0.0, 156.0, 119.0, 128.0, 176.0, 167.0, 186.0]),
    (ConductorSize::Mm50,   [  0.0,   0.0,   0.0,   0.0, 188.0, 143.0, 154.0, 212.0, 202.0, 224.0]),
    (ConductorSize::Mm70,   [  0.0,   0.0,   0.0,   0.0, 241.0, 184.0, 198.0, 271.0, 258.0, 287.0]),
    (ConductorSize::Mm95,   [  0.0,   0.0,   0.0,   0.0, 292.0, 222.0, 239.0, 328.0, 312.0, 347.0]),
    (ConductorSize::Mm120,  [  0.0,   0.0,   0.0,   0.0, 336.0, 255.0, 275.0, 377.0, 358.0, 399.0]),
    (ConductorSize::Mm150,  [  0.0,   0.0,   0.0,   0.0, 382.0, 291.0, 313.0, 429.0, 408.0, 454.0]),
    (ConductorSize::Mm185,  [  0.0,   0.0,   0.0,   0.0, 434.0, 330.0, 355.0, 487.0, 463.0, 515.0]),
    (ConductorSize::Mm240,  [  0.0,   0.0,   0.0,   0.0, 499.0, 380.0, 409.0, 561.0, 533.0, 594.0]),
    (ConductorSize::Mm300,  [  0.0,   0.0,   0.0,   0.0, 575.0, 438.0, 471.0, 646.0, 614.0, 684.0]),
];

fn table_for(cable_type: CableType) -> &'static [CapacityRow] {
    match cable_type {
        CableType::PvcTwinEarth | CableType::XlpeTwinEarth => PVC_TWIN_EARTH,
        CableType::PvcSingle | CableType::XlpeSingle => PVC_SINGLE,
        CableType::FireRated => FIRE_RESISTANT,
        CableType::Swa => SWA_XLPE,
        CableType::Micc => MICC,
        CableType::AluminiumXlpe => ALUMINIUM_XLPE,
    }
}

/// Rating for a construction, size and method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityLookup {
    /// Tabulated capacity It (A), already scaled when `fallback` is set
    pub amps: f64,

    /// Installation-method factor Cm applied (1.0 for a direct table hit)
    pub method_factor: f64,

    /// Method C rating was scaled because the method is not tabulated
    pub fallback: bool,
}

/// Exact tabulated rating, `None` when the size or method is not tabulated
pub fn tabulated_capacity(cable_type: CableType, size: ConductorSize, method: InstallationMethod) -> Option<f64> {
    table_for(cable_type)
        .iter()
        .find(|(s, _)| *s == size)
        .map(|(_, ratings)| ratings[method.column()])
        .filter(|amps| *amps > 0.0)
}

/// Rating for a size, falling back to method C × Cm for untabulated methods.
///
/// Returns `None` only when the size is not made in this construction.
pub fn capacity(cable_type: CableType, size: ConductorSize, method: InstallationMethod) -> Option<CapacityLookup> {
    if let Some(amps) = tabulated_capacity(cable_type, size, method) {
        return Some(CapacityLookup {
            amps,
            method_factor: 1.0,
            fallback: false,
        });
    }

    let clipped = tabulated_capacity(cable_type, size, InstallationMethod::C)?;
    let factor = installation_method_factor(method);
    Some(CapacityLookup {
        amps: clipped * factor,
        method_factor: factor,
        fallback: true,
    })
}
