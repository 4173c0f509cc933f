use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{non_blank, SourceError};

/*
NDFD time-series point forecast (Unit=e):
https://graphical.weather.gov/xml/docs/elementInputNames.php

Only the first value of each element is used, since begin == end asks for
the single period covering the target time.
*/

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Dwml {
    #[serde(default)]
    pub data: DwmlData,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct DwmlData {
    #[serde(default)]
    pub parameters: Option<Parameters>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Parameters {
    #[serde(default)]
    pub temperature: Vec<ParameterSeries>,
    #[serde(rename = "wind-speed", default)]
    pub wind_speed: Vec<ParameterSeries>,
    #[serde(default)]
    pub direction: Vec<ParameterSeries>,
    #[serde(rename = "cloud-amount", default)]
    pub cloud_amount: Vec<ParameterSeries>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ParameterSeries {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Vec<ParameterValue>,
}

/// `<value>52</value>` or `<value xsi:nil="true"/>`
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ParameterValue {
    #[serde(rename = "$value", default)]
    pub text: Option<String>,
}

/// NDFD values for the target time, in imperial units, kept as upstream text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NdfdForecast {
    pub temperature_f: Option<String>,
    pub wind_speed_kt: Option<String>,
    pub wind_direction_deg: Option<String>,
    pub cloud_amount_pct: Option<String>,
}

impl From<Parameters> for NdfdForecast {
    fn from(val: Parameters) -> Self {
        NdfdForecast {
            temperature_f: first_value(val.temperature),
            wind_speed_kt: first_value(val.wind_speed),
            wind_direction_deg: first_value(val.direction),
            cloud_amount_pct: first_value(val.cloud_amount),
        }
    }
}

impl NdfdForecast {
    /// Wind is only shown when a direction exists
    pub fn wind_summary(&self) -> Option<String> {
        let direction = self.wind_direction_deg.as_deref()?;
        Some(format!(
            "{}° at {} kt",
            direction,
            self.wind_speed_kt.as_deref().unwrap_or("N/A")
        ))
    }
}

/// First value of the first element that carries one
fn first_value(series: Vec<ParameterSeries>) -> Option<String> {
    series
        .into_iter()
        .find_map(|s| s.value.into_iter().next())
        .and_then(|v| non_blank(v.text))
}

pub fn parse_ndfd(xml: &str) -> Result<NdfdForecast, SourceError> {
    // Error responses start with "<error>" instead of "<dwml>"
    let trimmed = xml.trim_start();
    let body = trimmed
        .strip_prefix("<?xml")
        .and_then(|rest| rest.find("?>").map(|end| rest[end + 2..].trim_start()))
        .unwrap_or(trimmed);
    if body.starts_with("<error>") {
        return Err(SourceError::Upstream(body.lines().take(4).collect()));
    }

    let grouped_xml = group_parameter_elements(xml);
    let converted_xml: Dwml = serde_xml_rs::from_str(&grouped_xml)?;
    // A valid document without parameters still counts as a forecast, all fields absent
    Ok(converted_xml
        .data
        .parameters
        .map(NdfdForecast::from)
        .unwrap_or_default())
}

/// Reorder child elements within `<parameters>` blocks so that elements with
/// the same tag name are adjacent. `serde-xml-rs` cannot collect non-adjacent
/// sibling elements with the same name into a Vec, and NDFD interleaves e.g.
/// `temperature` and `wind-speed` variants with other elements.
pub fn group_parameter_elements(xml: &str) -> String {
    let mut result = String::with_capacity(xml.len());
    let mut remaining = xml;

    while let Some(params_start) = remaining.find("<parameters") {
        result.push_str(&remaining[..params_start]);

        let after_params = &remaining[params_start..];
        let params_end = match after_params.find("</parameters>") {
            Some(pos) => pos + "</parameters>".len(),
            None => {
                result.push_str(after_params);
                return result;
            }
        };

        let params_block = &after_params[..params_end];
        let open_tag_end = match params_block.find('>') {
            Some(pos) => pos + 1,
            None => {
                result.push_str(params_block);
                remaining = &after_params[params_end..];
                continue;
            }
        };

        let opening_tag = &params_block[..open_tag_end];
        // An unterminated opening tag finds the '>' of the closing tag; pass such blocks through
        let Some(inner) = params_block.get(open_tag_end..params_block.len() - "</parameters>".len())
        else {
            result.push_str(params_block);
            remaining = &after_params[params_end..];
            continue;
        };

        // (tag_name, full_element); sort_by is stable so same-tag order survives
        let mut elements: Vec<(&str, &str)> = Vec::new();
        let mut pos = 0;
        while let Some(offset) = inner[pos..].find('<') {
            let tag_start = pos + offset;
            let after_lt = &inner[tag_start + 1..];
            let tag_name_end = after_lt
                .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
                .unwrap_or(after_lt.len());
            let tag_name = &after_lt[..tag_name_end];

            let Some(open_end) = inner[tag_start..].find('>').map(|p| tag_start + p + 1) else {
                break;
            };
            let element_end = if inner[..open_end].ends_with("/>") {
                open_end
            } else {
                let closing_tag = format!("</{}>", tag_name);
                match inner[open_end..].find(&closing_tag) {
                    Some(close_pos) => open_end + close_pos + closing_tag.len(),
                    None => break,
                }
            };

            elements.push((tag_name, &inner[tag_start..element_end]));
            pos = element_end;
        }

        elements.sort_by(|a, b| a.0.cmp(b.0));

        result.push_str(opening_tag);
        result.push('\n');
        for (_, element) in &elements {
            result.push_str("      ");
            result.push_str(element);
            result.push('\n');
        }
        result.push_str("    </parameters>");

        remaining = &after_params[params_end..];
    }

    result.push_str(remaining);
    result
}
