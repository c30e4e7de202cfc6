//! In-memory bridge for unit tests.
use crate::bridge::Bridge;
use crate::error::{Error, Result};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
	pub method: &'static str,
	pub path: String,
	pub body: Option<Value>,
}

/// Serves `/api/test/lights/{index}` from a map and applies state patches
/// the way a bridge would.
#[derive(Default)]
pub struct MockBridge {
	lights: Mutex<BTreeMap<usize, Value>>,
	requests: Mutex<Vec<Request>>,
	served: Mutex<Vec<Value>>,
	pub fail_puts: AtomicBool,
	pub fail_gets: AtomicBool,
}

pub fn light_json(name: &str) -> Value {
	json!({
		"state": {
			"on": false,
			"bri": 100,
			"hue": 0,
			"sat": 0,
			"effect": "none",
			"xy": [0.3227, 0.3290],
			"ct": 366,
			"alert": "none",
			"colormode": "ct",
			"reachable": true
		},
		"type": "Extended color light",
		"name": name,
		"modelid": "LCT007",
		"manufacturername": "Philips",
		"uniqueid": format!("00:17:88:01:00:bd:c7:{:02x}-0b", name.len()),
		"swversion": "5.105.0.21169"
	})
}

impl MockBridge {
	pub fn with_lights(indices: &[(usize, &str)]) -> Self {
		let bridge = MockBridge::default();
		{
			let mut lights = bridge.lights.lock().unwrap();
			for (index, name) in indices {
				lights.insert(*index, light_json(name));
			}
		}
		bridge
	}

	pub fn insert(&self, index: usize, light: Value) {
		self.lights.lock().unwrap().insert(index, light);
	}

	pub fn requests(&self) -> Vec<Request> {
		self.requests.lock().unwrap().clone()
	}

	/// Bodies of all lights served by successful GETs, in order.
	pub fn served(&self) -> Vec<Value> {
		self.served.lock().unwrap().clone()
	}

	pub fn light(&self, index: usize) -> Option<Value> {
		self.lights.lock().unwrap().get(&index).cloned()
	}

	pub fn set_state_field(&self, index: usize, field: &str, value: Value) {
		let mut lights = self.lights.lock().unwrap();
		lights.get_mut(&index).unwrap()["state"][field] = value;
	}

	fn log(&self, method: &'static str, path: &str, body: Option<&Value>) {
		self.requests.lock().unwrap().push(Request {
			method,
			path: path.to_string(),
			body: body.cloned(),
		});
	}

	/// Splits `/api/test/lights/3/state` into `(3, true)`.
	fn parse(path: &str) -> (usize, bool) {
		let rest = path.strip_prefix("/api/test/lights/").expect("unexpected path");
		let mut parts = rest.split('/');
		let index = parts.next().unwrap().parse().unwrap();
		(index, parts.next() == Some("state"))
	}

	fn not_available(index: usize) -> String {
		json!([{"error": {
			"type": 3,
			"address": format!("/lights/{}", index),
			"description": format!("resource, /lights/{}, not available", index)
		}}])
		.to_string()
	}
}

impl Bridge for MockBridge {
	fn username(&self) -> &str {
		"test"
	}

	fn get(&self, path: &str) -> Result<String> {
		self.log("GET", path, None);
		if self.fail_gets.load(Ordering::SeqCst) {
			return Err(Error::Status(503));
		}
		let (index, _) = Self::parse(path);
		match self.light(index) {
			Some(light) => {
				self.served.lock().unwrap().push(light.clone());
				Ok(light.to_string())
			}
			None => Ok(Self::not_available(index)),
		}
	}

	fn put(&self, path: &str, body: &Value) -> Result<String> {
		self.log("PUT", path, Some(body));
		if self.fail_puts.load(Ordering::SeqCst) {
			return Err(Error::Status(500));
		}
		let (index, is_state) = Self::parse(path);
		let mut lights = self.lights.lock().unwrap();
		let light = match lights.get_mut(&index) {
			Some(light) => light,
			None => return Ok(Self::not_available(index)),
		};
		let target = if is_state { &mut light["state"] } else { light };
		for (key, value) in body.as_object().unwrap() {
			if !key.ends_with("_inc") && key != "transitiontime" {
				target[key] = value.clone();
			}
		}
		Ok(json!([{"success": body}]).to_string())
	}

	fn delete(&self, path: &str) -> Result<String> {
		self.log("DELETE", path, None);
		let (index, _) = Self::parse(path);
		self.lights.lock().unwrap().remove(&index);
		Ok(json!([{"success": format!("/lights/{} deleted", index)}]).to_string())
	}
}
