use serde::Deserialize;
use std::fmt;

/// Column order of the WWARA repeater list export.
pub const WWARA_COLUMNS: [&str; 38] = [
    "FC_RECORD_ID", "SOURCE", "OUTPUT_FREQ", "INPUT_FREQ", "STATE", "CITY",
    "LOCALE", "CALL", "SPONSOR", "CTCSS_IN", "CTCSS_OUT", "DCS_CDCSS", "DTMF",
    "LINK", "FM_WIDE", "FM_NARROW", "DSTAR_DV", "DSTAR_DD", "DMR",
    "DMR_COLOR_CODE", "FUSION", "FUSION_DSQ", "P25_PHASE_1", "P25_PHASE_2",
    "P25_NAC", "NXDN_DIGITAL", "NXDN_MIXED", "NXDN_RAN", "ATV", "DATV", "RACES",
    "ARES", "WX", "URL", "LATITUDE", "LONGITUDE", "EXPIRATION_DATE", "COMMENT",
];

/// Column order of a CHIRP memory import file.
pub const CHIRP_COLUMNS: [&str; 21] = [
    "Location", "Name", "Frequency", "Duplex", "Offset", "Tone", "rToneFreq",
    "cToneFreq", "DtcsCode", "DtcsPolarity", "RxDtcsCode", "CrossMode", "Mode",
    "TStep", "Skip", "Power", "Comment", "URCALL", "RPT1CALL", "RPT2CALL",
    "DVCODE",
];

/// One repeater listing as exported by WWARA. Every cell is kept as text;
/// missing columns deserialize to the empty string.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SourceRecord {
    pub fc_record_id: String,
    pub source: String,
    pub output_freq: String,
    pub input_freq: String,
    pub state: String,
    pub city: String,
    pub locale: String,
    pub call: String,
    pub sponsor: String,
    pub ctcss_in: String,
    pub ctcss_out: String,
    pub dcs_cdcss: String,
    pub dtmf: String,
    pub link: String,
    pub fm_wide: String,
    pub fm_narrow: String,
    pub dstar_dv: String,
    pub dstar_dd: String,
    pub dmr: String,
    pub dmr_color_code: String,
    pub fusion: String,
    pub fusion_dsq: String,
    pub p25_phase_1: String,
    pub p25_phase_2: String,
    pub p25_nac: String,
    pub nxdn_digital: String,
    pub nxdn_mixed: String,
    pub nxdn_ran: String,
    pub atv: String,
    pub datv: String,
    pub races: String,
    pub ares: String,
    pub wx: String,
    pub url: String,
    pub latitude: String,
    pub longitude: String,
    pub expiration_date: String,
    pub comment: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Duplex {
    #[default]
    Simplex,
    Plus,
    Minus,
}

impl Duplex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Duplex::Simplex => "",
            Duplex::Plus => "+",
            Duplex::Minus => "-",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToneMode {
    #[default]
    Off,
    Tone,
    Dtcs,
}

impl ToneMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToneMode::Off => "",
            ToneMode::Tone => "Tone",
            ToneMode::Dtcs => "DTCS",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DtcsPolarity {
    #[default]
    NN,
    NR,
    RN,
    RR,
}

impl DtcsPolarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DtcsPolarity::NN => "NN",
            DtcsPolarity::NR => "NR",
            DtcsPolarity::RN => "RN",
            DtcsPolarity::RR => "RR",
        }
    }
}

/// Operating modes the WWARA flags can select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Fm,
    Nfm,
    Dv,
    Dig,
    Dmr,
    P25,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Fm => "FM",
            Mode::Nfm => "NFM",
            Mode::Dv => "DV",
            Mode::Dig => "DIG",
            Mode::Dmr => "DMR",
            Mode::P25 => "P25",
        }
    }
}

macro_rules! display_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Duplex, ToneMode, DtcsPolarity, Mode);

/// One CHIRP memory channel.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetRecord {
    pub location: usize,
    pub name: String,
    pub frequency: String,
    pub duplex: Duplex,
    pub offset: String,
    pub tone: ToneMode,
    pub r_tone_freq: String,
    pub c_tone_freq: String,
    pub dtcs_code: String,
    pub dtcs_polarity: DtcsPolarity,
    pub rx_dtcs_code: String,
    pub cross_mode: String,
    pub mode: Option<Mode>,
    pub tstep: String,
    pub skip: String,
    pub power: String,
    pub comment: String,
    pub urcall: String,
    pub rpt1call: String,
    pub rpt2call: String,
    pub dvcode: String,
}

impl TargetRecord {
    pub fn mode_str(&self) -> &'static str {
        self.mode.map(|m| m.as_str()).unwrap_or("")
    }

    /// Cells in `CHIRP_COLUMNS` order.
    pub fn to_row(&self) -> [String; 21] {
        [
            self.location.to_string(),
            self.name.clone(),
            self.frequency.clone(),
            self.duplex.to_string(),
            self.offset.clone(),
            self.tone.to_string(),
            self.r_tone_freq.clone(),
            self.c_tone_freq.clone(),
            self.dtcs_code.clone(),
            self.dtcs_polarity.to_string(),
            self.rx_dtcs_code.clone(),
            self.cross_mode.clone(),
            self.mode_str().to_string(),
            self.tstep.clone(),
            self.skip.clone(),
            self.power.clone(),
            self.comment.clone(),
            self.urcall.clone(),
            self.rpt1call.clone(),
            self.rpt2call.clone(),
            self.dvcode.clone(),
        ]
    }
}
