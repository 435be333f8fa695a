//! Demo board used when no seed file is configured

use fleetboard_infra::seed_loader::BoardSeed;
use fleetboard_types::Result;

/// Six crew members, two fleets and two pending stops
pub const DEMO_SEED_TOML: &str = r#"
[[members]]
name = "Jose de Arimateia"
role = "Motorista"

[[members]]
name = "Elison Souza"
role = "Auxiliar de Distribuição"

[[members]]
name = "José Avelino"
role = "Motorista Granel"

[[members]]
name = "José Estancely"
role = "Operador Granel"

[[members]]
name = "Carlos Santos"
role = "Motorista I"

[[members]]
name = "Maria Oliveira"
role = "Auxiliar de Distribuição"

[[fleets]]
number = "113"
route_details = "Zona Sul - Rota prioritária"
driver = "Jose de Arimateia"
helper = "Elison Souza"

[[fleets]]
number = "173"
route_details = "Carga Granel"
driver = "José Avelino"
operator = "José Estancely"

[[stops]]
client_code = "0451"
client_name = "Supermercado Silva"
zip_code = "01310-100"
fleet = "113"

[[stops]]
client_code = "8821"
client_name = "Padaria Estrela"
zip_code = "01311-200"
fleet = "113"

[[stops]]
client_code = "9901"
client_name = "Mercado do João"
zip_code = "04550-000"

[[stops]]
client_code = "9902"
client_name = "Empório Central"
zip_code = "04551-000"
"#;

pub fn demo_seed() -> Result<BoardSeed> {
    BoardSeed::load_from_str(DEMO_SEED_TOML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_seed_parses() {
        let seed = demo_seed().unwrap();
        assert_eq!(seed.members.len(), 6);
        assert_eq!(seed.fleets.len(), 2);
        assert_eq!(seed.stops.iter().filter(|s| s.fleet.is_none()).count(), 2);
    }
}
