use serde::Deserialize;

// Wire model of the aviationweather.gov data server XML
// (requestType=retrieve&format=xml, dataSource=metars|tafs)

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct AwcResponse {
    #[serde(default)]
    pub data: AwcData,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct AwcData {
    #[serde(rename = "METAR", default)]
    pub metars: Vec<MetarRecord>,
    #[serde(rename = "TAF", default)]
    pub tafs: Vec<TafRecord>,
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
pub struct MetarRecord {
    pub raw_text: Option<String>,
    pub station_id: Option<String>,
    pub observation_time: Option<String>,
    pub temp_c: Option<String>,
    pub dewpoint_c: Option<String>,
    pub wind_dir_degrees: Option<String>,
    pub wind_speed_kt: Option<String>,
    pub visibility_statute_mi: Option<String>,
    pub altim_in_hg: Option<String>,
    #[serde(default)]
    pub sky_condition: Vec<SkyCondition>,
}

/// `<sky_condition sky_cover="BKN" cloud_base_ft_agl="2500"/>`
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
pub struct SkyCondition {
    pub sky_cover: Option<String>,
    pub cloud_base_ft_agl: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
pub struct TafRecord {
    pub raw_text: Option<String>,
    pub station_id: Option<String>,
    pub issue_time: Option<String>,
}

pub fn parse_awc_response(xml: &str) -> Result<AwcResponse, serde_xml_rs::Error> {
    serde_xml_rs::from_str(xml)
}
