use crate::bridge::Bridge;
use crate::colors::Color;
use crate::error::{Error, Result};
use std::fmt;
use std::thread;
use std::time::Duration;

/// Highest index probed by [`get_all_lights`].
pub const MAX_LIGHT_INDEX: usize = 100;

/// Part of the body the bridge sends for a light index it does not know.
///
/// The bridge wraps this in an error object, but the text itself is what
/// tells a missing light apart from a real one.
pub const NOT_AVAILABLE_MARKER: &str = "not available";

/// Pace of [`Light::blink`], two steps per second.
pub const BLINK_STEP: Duration = Duration::from_millis(500);
/// Brightness of the bright blink phase, about 75 %.
pub const BLINK_HIGH: u8 = 190;
/// Brightness of the dim blink phase, about 25 %.
pub const BLINK_LOW: u8 = 64;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
/// Attributes of a light
pub struct LightAttributes {
	pub uniqueid: String,
	#[serde(rename = "type")]
	pub light_type: String,
	pub name: String,
	pub modelid: String,
	pub manufacturername: String,
	pub productid: String,
	pub state: LightState,
	pub swversion: String,
	pub swconfigid: String,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
/// Current state of a light
pub struct LightState {
	pub on: bool,
	/// Brightness
	pub bri: u8,
	pub hue: u16,
	/// Saturation
	pub sat: u8,
	pub effect: Effect,
	/// CIE color space coordinates
	pub xy: [f64; 2],
	/// Color tone
	pub ct: u16,
	/// Alert mode
	pub alert: String,
	pub colormode: String,
	pub reachable: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
	None,
	Colorloop,
	/// Any effect reported by the bridge that this crate does not drive.
	#[serde(other)]
	Other,
}

impl Default for Effect {
	fn default() -> Self {
		Effect::None
	}
}

fn is_unset<T: Default + PartialEq>(value: &T) -> bool {
	*value == T::default()
}

/// Changes to send to a light.
///
/// `on` is always sent. Every other field is left out while it holds its
/// default, so the light keeps its current value for it.
///
/// ```
/// use hust::StateUpdate;
///
/// let dim = StateUpdate { on: true, bri: 30, ..Default::default() };
/// assert_eq!(serde_json::to_string(&dim).unwrap(), r#"{"on":true,"bri":30}"#);
/// ```
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct StateUpdate {
	pub on: bool,
	#[serde(skip_serializing_if = "is_unset")]
	pub bri: u8,
	#[serde(skip_serializing_if = "is_unset")]
	pub hue: u16,
	#[serde(skip_serializing_if = "is_unset")]
	pub sat: u8,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub xy: Option<[f64; 2]>,
	#[serde(skip_serializing_if = "is_unset")]
	pub ct: u16,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub effect: Option<Effect>,
	#[serde(skip_serializing_if = "is_unset")]
	pub alert: String,
	/// In steps of 100 ms.
	#[serde(skip_serializing_if = "is_unset")]
	pub transitiontime: u16,
	#[serde(skip_serializing_if = "is_unset")]
	pub bri_inc: i16,
	#[serde(skip_serializing_if = "is_unset")]
	pub sat_inc: i16,
	#[serde(skip_serializing_if = "is_unset")]
	pub hue_inc: i32,
	#[serde(skip_serializing_if = "is_unset")]
	pub ct_inc: i32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub xy_inc: Option<[f64; 2]>,
}

impl StateUpdate {
	pub fn power(on: bool) -> Self {
		StateUpdate {
			on,
			..Default::default()
		}
	}
}

/// Local mirror of a light on a bridge.
///
/// The attributes always come from a read of the bridge. Every change is
/// written first and then read back in full, so after a successful call the
/// mirror shows what the bridge reported, not what was asked for.
#[derive(Clone)]
pub struct Light<'b> {
	index: usize,
	bridge: &'b dyn Bridge,
	attributes: LightAttributes,
}

impl fmt::Debug for Light<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Light")
			.field("index", &self.index)
			.field("attributes", &self.attributes)
			.finish()
	}
}

fn light_path(username: &str, index: usize) -> String {
	format!("/api/{}/lights/{}", username, index)
}

impl<'b> Light<'b> {
	/// Position of the light on the bridge, starting at 1.
	pub fn index(&self) -> usize {
		self.index
	}

	pub fn bridge(&self) -> &'b dyn Bridge {
		self.bridge
	}

	pub fn attributes(&self) -> &LightAttributes {
		&self.attributes
	}

	pub fn name(&self) -> &str {
		&self.attributes.name
	}

	pub fn state(&self) -> &LightState {
		&self.attributes.state
	}

	fn path(&self) -> String {
		light_path(self.bridge.username(), self.index)
	}

	/// Replaces the mirror with a fresh read of the light.
	pub fn refresh(&mut self) -> Result<()> {
		*self = get_light_by_index(self.bridge, self.index)?;
		Ok(())
	}

	/// Writes `update` to the light, then reloads every attribute.
	///
	/// If the write fails the mirror is left as it was. If the write succeeds
	/// but the reload fails, the reload error is returned and the light may
	/// have changed anyway.
	pub fn set_state(&mut self, update: &StateUpdate) -> Result<()> {
		let body = serde_json::to_value(update)?;
		let path = format!("{}/state", self.path());
		tracing::debug!(index = self.index, update = %body, "setting light state");
		self.bridge.put(&path, &body)?;
		self.refresh()
	}

	pub fn on(&mut self) -> Result<()> {
		self.set_state(&StateUpdate::power(true))
	}

	pub fn off(&mut self) -> Result<()> {
		self.set_state(&StateUpdate::power(false))
	}

	/// Switches the light based on the mirrored power state, which may be
	/// outdated. Call [`refresh`](Self::refresh) first to act on the live one.
	pub fn toggle(&mut self) -> Result<()> {
		if self.attributes.state.on {
			tracing::debug!(index = self.index, "toggling off");
			self.off()
		} else {
			tracing::debug!(index = self.index, "toggling on");
			self.on()
		}
	}

	/// Blinks between a bright and a dim level for `seconds`, then restores
	/// the power state and brightness the light had before.
	///
	/// Blocks for the whole duration.
	pub fn blink(&mut self, seconds: u32) -> Result<()> {
		let was_on = self.attributes.state.on;
		let original_bri = self.attributes.state.bri;

		for step in 0..seconds.saturating_mul(2) {
			let bri = if step % 2 == 0 { BLINK_HIGH } else { BLINK_LOW };
			self.set_state(&StateUpdate {
				on: true,
				bri,
				..Default::default()
			})?;
			thread::sleep(BLINK_STEP);
		}

		if self.attributes.state.on != was_on || self.attributes.state.bri != original_bri {
			self.set_state(&StateUpdate {
				on: was_on,
				bri: original_bri,
				..Default::default()
			})?;
		}
		Ok(())
	}

	/// Starts (`true`) or stops (`false`) cycling through all hues.
	pub fn color_loop(&mut self, activate: bool) -> Result<()> {
		let effect = if activate { Effect::Colorloop } else { Effect::None };
		self.set_state(&StateUpdate {
			on: true,
			effect: Some(effect),
			..Default::default()
		})
	}

	pub fn set_color(&mut self, color: Color) -> Result<()> {
		self.set_state(&StateUpdate {
			on: true,
			xy: Some(color.xy()),
			..Default::default()
		})
	}

	/// Renames the light on the bridge and reloads it.
	pub fn set_name(&mut self, name: &str) -> Result<()> {
		tracing::debug!(index = self.index, new_name = name, "renaming light");
		self.bridge.put(&self.path(), &serde_json::json!({ "name": name }))?;
		self.refresh()
	}

	/// Removes the light from the bridge.
	pub fn delete(self) -> Result<()> {
		tracing::debug!(index = self.index, "deleting light");
		self.bridge.delete(&self.path())?;
		Ok(())
	}
}

/// Reads the light at `index` from the bridge.
pub fn get_light_by_index(bridge: &dyn Bridge, index: usize) -> Result<Light<'_>> {
	let body = bridge.get(&light_path(bridge.username(), index))?;
	if body.contains(NOT_AVAILABLE_MARKER) {
		return Err(Error::Index(index));
	}
	let attributes = serde_json::from_str(&body)?;
	Ok(Light {
		index,
		bridge,
		attributes,
	})
}

/// Reads lights 1, 2, ... up to [`MAX_LIGHT_INDEX`].
///
/// The scan ends at the first index that cannot be read, so lights behind a
/// gap in the numbering are not returned.
pub fn get_all_lights(bridge: &dyn Bridge) -> Vec<Light<'_>> {
	let mut lights = Vec::new();
	for index in 1..=MAX_LIGHT_INDEX {
		match get_light_by_index(bridge, index) {
			Ok(light) => lights.push(light),
			Err(e) => {
				tracing::debug!(index, error = %e, "light scan stopped");
				break;
			}
		}
	}
	lights
}

/// Finds the light whose name is exactly `name`.
pub fn get_light_by_name<'b>(bridge: &'b dyn Bridge, name: &str) -> Result<Light<'b>> {
	get_all_lights(bridge)
		.into_iter()
		.find(|light| light.name() == name)
		.ok_or_else(|| Error::NotFound(name.to_string()))
}
