use crate::model::{DtcsPolarity, Duplex, Mode, SourceRecord, TargetRecord, ToneMode};
use crate::validator::COMMENT_MAX;
use log::{debug, trace};

pub const DEFAULT_TONE: &str = "88.5";
pub const DEFAULT_DTCS_CODE: &str = "23";

/// Next CHIRP memory location for a conversion run. Each run owns one; the
/// pipeline decides when it advances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelCounter {
    next_index: usize,
}

impl ChannelCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(next_index: usize) -> Self {
        Self { next_index }
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn advance(&mut self) {
        self.next_index += 1;
    }
}

/// Map one WWARA listing onto a CHIRP memory at the counter's current index.
/// Never fails: bad cells come out as values the validator will reject.
pub fn map_row(src: &SourceRecord, counter: &ChannelCounter) -> TargetRecord {
    trace!("mapping {:?}", src);

    let frequency_out = parse_mhz(&src.output_freq);
    let frequency_in = parse_mhz(&src.input_freq);

    // NaN compares false, so a missing frequency lands on '-' with a NaN offset
    let (duplex, offset) = if frequency_out > frequency_in {
        (Duplex::Plus, frequency_out - frequency_in)
    } else {
        (Duplex::Minus, frequency_in - frequency_out)
    };

    let mut tone = ToneMode::Off;
    let mut r_tone_freq = DEFAULT_TONE.to_string();
    let mut c_tone_freq = DEFAULT_TONE.to_string();
    let mut dtcs_code = DEFAULT_DTCS_CODE.to_string();

    if !src.ctcss_in.trim().is_empty() {
        tone = ToneMode::Tone;
        r_tone_freq = tone_or_default(&src.ctcss_in);
        if !src.ctcss_out.trim().is_empty() {
            c_tone_freq = tone_or_default(&src.ctcss_out);
        }
    } else if !src.dcs_cdcss.trim().is_empty() {
        tone = ToneMode::Dtcs;
        dtcs_code = src.dcs_cdcss.trim().to_string();
    }

    let mode = select_mode(src);
    let comment = synthesize_comment(src);

    let row = TargetRecord {
        location: counter.next_index(),
        name: src.call.clone(),
        frequency: format!("{:.6}", frequency_out),
        duplex,
        offset: format!("{:.6}", offset),
        tone,
        r_tone_freq,
        c_tone_freq,
        dtcs_code,
        dtcs_polarity: DtcsPolarity::NN,
        rx_dtcs_code: DEFAULT_DTCS_CODE.to_string(),
        cross_mode: "Tone->Tone".to_string(),
        mode,
        tstep: "5.00".to_string(),
        skip: String::new(),
        power: "5.0W".to_string(),
        comment,
        urcall: String::new(),
        rpt1call: String::new(),
        rpt2call: String::new(),
        dvcode: String::new(),
    };
    debug!(
        "mapped loc={} name={} freq={} duplex={} offset={} tone={} mode={}",
        row.location, row.name, row.frequency, row.duplex, row.offset, row.tone, row.mode_str()
    );
    row
}

fn parse_mhz(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Blank or non-numeric tone cells fall back to the 88.5 default.
fn tone_or_default(s: &str) -> String {
    let t = s.trim();
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() => t.to_string(),
        _ => DEFAULT_TONE.to_string(),
    }
}

fn flag(s: &str) -> bool {
    s.trim() == "Y"
}

fn select_mode(src: &SourceRecord) -> Option<Mode> {
    if flag(&src.fm_wide) {
        Some(Mode::Fm)
    } else if flag(&src.fm_narrow) {
        Some(Mode::Nfm)
    } else if flag(&src.dstar_dv) {
        Some(Mode::Dv)
    } else if flag(&src.dstar_dd) {
        Some(Mode::Dig)
    } else if flag(&src.dmr) {
        Some(Mode::Dmr)
    } else if flag(&src.p25_phase_1) || flag(&src.p25_phase_2) {
        Some(Mode::P25)
    } else if flag(&src.atv) {
        Some(Mode::Dig)
    } else {
        None
    }
}

/// "City, State Locale", skipping empty parts.
fn geographic_locale(src: &SourceRecord) -> String {
    let mut geo = String::new();
    if !src.city.is_empty() {
        geo.push_str(&src.city);
    }
    if !src.state.is_empty() {
        if !geo.is_empty() {
            geo.push_str(", ");
        }
        geo.push_str(&src.state);
    }
    if !src.locale.is_empty() {
        if !geo.is_empty() {
            geo.push(' ');
        }
        geo.push_str(&src.locale);
    }
    geo
}

/// A comment suffix piece. `checked` is the text measured against the limit,
/// which differs from the appended text for RACES.
struct Fragment {
    checked: String,
    appended: String,
}

impl Fragment {
    fn plain(text: String) -> Self {
        Self { checked: text.clone(), appended: text }
    }
}

fn labelled(label: &str, value: &str) -> Option<Fragment> {
    (!value.trim().is_empty()).then(|| Fragment::plain(format!(" {label}: {value}")))
}

fn flagged(value: &str, text: &str) -> Option<Fragment> {
    flag(value).then(|| Fragment::plain(text.to_string()))
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Build the CHIRP comment from the WWARA comment plus descriptive fragments.
/// Each fragment is kept only if it fits in `COMMENT_MAX` given everything
/// appended before it, so order decides what survives near the limit.
pub fn synthesize_comment(src: &SourceRecord) -> String {
    let base = src.comment.as_str();
    let base_len = char_len(base);
    let fits = |suffix: &str, extra: &str| base_len + char_len(suffix) + char_len(extra) <= COMMENT_MAX;

    let mut suffix = String::new();
    if base_len > 0 {
        suffix.push(' ');
    }

    let geo = geographic_locale(src);
    if !geo.is_empty() && fits(&suffix, &geo) {
        if base_len > 0 {
            suffix.push(' ');
        }
        suffix.push(' ');
        suffix.push_str(&geo);
    }

    let lat_lon = (!src.latitude.trim().is_empty() && !src.longitude.trim().is_empty()).then(|| {
        Fragment::plain(format!(" Lat: {}, Lon: {}", src.latitude, src.longitude))
    });
    let races = flag(&src.races).then(|| Fragment {
        checked: " RACES".to_string(),
        appended: "RACES".to_string(),
    });

    let fragments = [
        labelled("Sponsor", &src.sponsor),
        labelled("Link", &src.link),
        labelled("URL", &src.url),
        labelled("Expiration", &src.expiration_date),
        lat_lon,
        flagged(&src.ares, " ARES"),
        races,
        flagged(&src.wx, " WX"),
        labelled("DMR Color Code", &src.dmr_color_code),
        labelled("Fusion DSQ", &src.fusion_dsq),
        flagged(&src.nxdn_digital, " NXDN Digital"),
        flagged(&src.nxdn_mixed, " NXDN Mixed"),
        labelled("NXDN RAN", &src.nxdn_ran),
        flagged(&src.atv, " ATV"),
        flagged(&src.datv, " DATV"),
    ];

    for fragment in fragments.into_iter().flatten() {
        if fits(&suffix, &fragment.checked) {
            suffix.push_str(&fragment.appended);
        } else {
            trace!("comment fragment dropped: {:?}", fragment.appended);
        }
    }

    let mut comment = String::with_capacity(base.len() + suffix.len());
    comment.push_str(base);
    comment.push_str(&suffix);
    comment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k7led() -> SourceRecord {
        SourceRecord {
            call: "K7LED".into(),
            output_freq: "146.8200".into(),
            input_freq: "146.2200".into(),
            ctcss_in: "88.5".into(),
            ctcss_out: "88.5".into(),
            locale: "Issaquah Alps".into(),
            state: "WA".into(),
            city: "Issaquah".into(),
            sponsor: "WWARA".into(),
            link: "Yes".into(),
            url: "https://example.com".into(),
            expiration_date: "2024-12-31".into(),
            latitude: "47.6062".into(),
            longitude: "-122.3321".into(),
            fm_wide: "Y".into(),
            comment: "Test Comment".into(),
            ares: "Y".into(),
            races: "Y".into(),
            wx: "Y".into(),
            dmr_color_code: "1".into(),
            fusion_dsq: "123".into(),
            nxdn_digital: "Y".into(),
            nxdn_mixed: "Y".into(),
            nxdn_ran: "2".into(),
            atv: "Y".into(),
            datv: "Y".into(),
            ..Default::default()
        }
    }

    #[test]
    fn maps_full_listing() {
        let row = map_row(&k7led(), &ChannelCounter::starting_at(7));
        assert_eq!(row.location, 7);
        assert_eq!(row.name, "K7LED");
        assert_eq!(row.frequency, "146.820000");
        assert_eq!(row.duplex, Duplex::Plus);
        assert_eq!(row.offset, "0.600000");
        assert_eq!(row.tone, ToneMode::Tone);
        assert_eq!(row.r_tone_freq, "88.5");
        assert_eq!(row.c_tone_freq, "88.5");
        assert_eq!(row.dtcs_code, "23");
        assert_eq!(row.dtcs_polarity, DtcsPolarity::NN);
        assert_eq!(row.rx_dtcs_code, "23");
        assert_eq!(row.cross_mode, "Tone->Tone");
        assert_eq!(row.mode, Some(Mode::Fm));
        assert_eq!(row.tstep, "5.00");
        assert_eq!(row.skip, "");
        assert_eq!(row.power, "5.0W");
        assert_eq!(
            row.comment,
            "Test Comment   Issaquah, WA Issaquah Alps Sponsor: WWARA \
             Link: Yes URL: https://example.com Expiration: 2024-12-31 \
             Lat: 47.6062, Lon: -122.3321 ARESRACES WX DMR Color Code: 1 \
             Fusion DSQ: 123 NXDN Digital NXDN Mixed NXDN RAN: 2 ATV DATV"
        );
        assert!(row.urcall.is_empty() && row.rpt1call.is_empty());
        assert!(row.rpt2call.is_empty() && row.dvcode.is_empty());
    }

    #[test]
    fn bare_listing_gets_defaults() {
        let src = SourceRecord {
            call: "W7AW".into(),
            output_freq: "146.9600".into(),
            input_freq: "146.3600".into(),
            ..Default::default()
        };
        let row = map_row(&src, &ChannelCounter::new());
        assert_eq!(row.tone, ToneMode::Off);
        assert_eq!(row.mode, None);
        assert_eq!(row.r_tone_freq, "88.5");
        assert_eq!(row.c_tone_freq, "88.5");
        assert_eq!(row.dtcs_code, "23");
        assert_eq!(row.dtcs_polarity, DtcsPolarity::NN);
        assert_eq!(row.comment, "");
    }

    #[test]
    fn dcs_selects_dtcs() {
        let src = SourceRecord {
            output_freq: "441.1000".into(),
            input_freq: "446.1000".into(),
            dcs_cdcss: "023".into(),
            ..Default::default()
        };
        let row = map_row(&src, &ChannelCounter::new());
        assert_eq!(row.tone, ToneMode::Dtcs);
        assert_eq!(row.dtcs_code, "023");
        assert_eq!(row.duplex, Duplex::Minus);
        assert_eq!(row.offset, "5.000000");
    }

    #[test]
    fn ctcss_wins_over_dcs() {
        let src = SourceRecord {
            ctcss_in: "103.5".into(),
            dcs_cdcss: "023".into(),
            ..Default::default()
        };
        let row = map_row(&src, &ChannelCounter::new());
        assert_eq!(row.tone, ToneMode::Tone);
        assert_eq!(row.r_tone_freq, "103.5");
        assert_eq!(row.c_tone_freq, "88.5");
        assert_eq!(row.dtcs_code, "23");
    }

    #[test]
    fn non_numeric_tone_falls_back() {
        let src = SourceRecord {
            ctcss_in: "n/a".into(),
            ctcss_out: "nan".into(),
            ..Default::default()
        };
        let row = map_row(&src, &ChannelCounter::new());
        assert_eq!(row.tone, ToneMode::Tone);
        assert_eq!(row.r_tone_freq, "88.5");
        assert_eq!(row.c_tone_freq, "88.5");
    }

    #[test]
    fn missing_output_frequency_renders_nan() {
        let src = SourceRecord { input_freq: "146.2".into(), ..Default::default() };
        let row = map_row(&src, &ChannelCounter::new());
        assert_eq!(row.frequency, "NaN");
        assert_eq!(row.duplex, Duplex::Minus);
        assert_eq!(row.offset, "NaN");
    }

    #[test]
    fn mode_priority() {
        let mut src = SourceRecord {
            fm_narrow: "Y".into(),
            dmr: "Y".into(),
            atv: "Y".into(),
            ..Default::default()
        };
        assert_eq!(select_mode(&src), Some(Mode::Nfm));
        src.fm_narrow.clear();
        assert_eq!(select_mode(&src), Some(Mode::Dmr));
        src.dmr.clear();
        assert_eq!(select_mode(&src), Some(Mode::Dig));
        src.atv = "N".into();
        src.p25_phase_2 = "Y".into();
        assert_eq!(select_mode(&src), Some(Mode::P25));
        src.p25_phase_2.clear();
        src.dstar_dd = "Y".into();
        assert_eq!(select_mode(&src), Some(Mode::Dig));
        src.dstar_dv = "Y".into();
        assert_eq!(select_mode(&src), Some(Mode::Dv));
    }

    #[test]
    fn locale_joins_present_parts() {
        let src = SourceRecord { state: "WA".into(), locale: "Tiger Mtn".into(), ..Default::default() };
        assert_eq!(geographic_locale(&src), "WA Tiger Mtn");
        assert_eq!(synthesize_comment(&src), " WA Tiger Mtn");
    }

    #[test]
    fn overflowing_fragment_is_skipped_but_later_ones_fit() {
        // 240 + 1 separator leaves 14 chars: " Sponsor: WWARA-LONG" (20) is
        // dropped, " WX" (3) still fits behind the separator.
        let src = SourceRecord {
            comment: "c".repeat(240),
            sponsor: "WWARA-LONG".into(),
            wx: "Y".into(),
            ..Default::default()
        };
        let comment = synthesize_comment(&src);
        assert_eq!(comment, format!("{}  WX", "c".repeat(240)));
        assert!(comment.chars().count() <= COMMENT_MAX);
    }

    #[test]
    fn fragment_exactly_at_limit_is_kept() {
        let src = SourceRecord { comment: "c".repeat(251), wx: "Y".into(), ..Default::default() };
        assert_eq!(synthesize_comment(&src).chars().count(), 255);
        let src = SourceRecord { comment: "c".repeat(252), wx: "Y".into(), ..Default::default() };
        assert_eq!(synthesize_comment(&src), format!("{} ", "c".repeat(252)));
    }
}
