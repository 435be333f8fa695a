//! Delivery stop type definitions

use serde::{Deserialize, Serialize};

/// A client delivery. The payload never changes; only the container
/// holding it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryStop {
    pub id: String,
    /// Client code (código do cliente)
    pub client_code: String,
    /// Client name (nome do cliente)
    pub client_name: String,
    /// CEP
    #[serde(default)]
    pub zip_code: String,
}

/// Ordered stop list owned by the backlog or by one fleet.
///
/// New arrivals always go to the end; removal keeps the relative order of
/// the remaining stops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopList(Vec<DeliveryStop>);

impl StopList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeliveryStop> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[DeliveryStop] {
        &self.0
    }

    pub fn contains(&self, stop_id: &str) -> bool {
        self.0.iter().any(|s| s.id == stop_id)
    }

    pub fn get(&self, stop_id: &str) -> Option<&DeliveryStop> {
        self.0.iter().find(|s| s.id == stop_id)
    }

    pub fn push(&mut self, stop: DeliveryStop) {
        self.0.push(stop);
    }

    /// Remove a stop by id, returning it
    pub fn take(&mut self, stop_id: &str) -> Option<DeliveryStop> {
        let idx = self.0.iter().position(|s| s.id == stop_id)?;
        Some(self.0.remove(idx))
    }

    /// Move every stop out, leaving the list empty
    pub fn drain_all(&mut self) -> Vec<DeliveryStop> {
        std::mem::take(&mut self.0)
    }

    pub fn ids(&self) -> Vec<String> {
        self.0.iter().map(|s| s.id.clone()).collect()
    }
}

impl From<Vec<DeliveryStop>> for StopList {
    fn from(stops: Vec<DeliveryStop>) -> Self {
        Self(stops)
    }
}

impl Extend<DeliveryStop> for StopList {
    fn extend<T: IntoIterator<Item = DeliveryStop>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a StopList {
    type Item = &'a DeliveryStop;
    type IntoIter = std::slice::Iter<'a, DeliveryStop>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str) -> DeliveryStop {
        DeliveryStop {
            id: id.to_string(),
            client_code: format!("C{}", id),
            client_name: format!("Cliente {}", id),
            zip_code: String::new(),
        }
    }

    #[test]
    fn test_take_keeps_remaining_order() {
        let mut list = StopList::from(vec![stop("a"), stop("b"), stop("c")]);
        let taken = list.take("b").unwrap();
        assert_eq!(taken.id, "b");
        assert_eq!(list.ids(), vec!["a", "c"]);
    }

    #[test]
    fn test_take_missing_is_none() {
        let mut list = StopList::from(vec![stop("a")]);
        assert!(list.take("zz").is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let list = StopList::from(vec![stop("a")]);
        let json = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["client_code"], "Ca");
    }
}
