//! Sample Istanbul data (Kadıköy and Beşiktaş) for development databases.
//!
//! Seeding is idempotent: warehouses and safe zones are matched by name,
//! items by SKU, and existing stock links are left alone.

use geo::{Point, Polygon};
use persistence::db::Database;
use persistence::repositories::{
    InventoryRepository, ItemRepository, NewSafeZone, NewWarehouse, SafeZoneRepository,
    WarehouseRepository,
};
use serde_json::{json, Map, Value};
use tracing::info;

use domain::models::geometry::Bounds;

pub struct WarehouseSeed {
    pub name: &'static str,
    /// `(lon, lat)`
    pub location: (f64, f64),
    pub address: &'static str,
    pub capacity: i32,
    pub manager: &'static str,
    pub phone: &'static str,
    pub operating_hours: &'static str,
    pub equipment: [&'static str; 2],
}

pub struct SafeZoneSeed {
    pub name: &'static str,
    pub capacity: i32,
    pub status: &'static str,
    pub bounds: Bounds,
    pub zone_type: &'static str,
    pub facilities: &'static [&'static str],
    pub last_verified: &'static str,
}

pub struct ItemSeed {
    pub sku: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub category: &'static str,
}

pub const WAREHOUSES: [WarehouseSeed; 5] = [
    WarehouseSeed {
        name: "Kadıköy Central Warehouse",
        location: (29.0230, 40.9910),
        address: "Bahariye Cad. 45, Kadıköy, İstanbul",
        capacity: 5000,
        manager: "Ahmet Yılmaz",
        phone: "+90 216 123 4567",
        operating_hours: "09:00-18:00",
        equipment: ["forklift", "shelving units"],
    },
    WarehouseSeed {
        name: "Beşiktaş Supply Hub",
        location: (29.0010, 41.0430),
        address: "Barbaros Bulvarı 120, Beşiktaş, İstanbul",
        capacity: 8000,
        manager: "Fatih Kara",
        phone: "+90 212 345 6789",
        operating_hours: "08:00-20:00",
        equipment: ["loading dock", "temperature control"],
    },
    WarehouseSeed {
        name: "Moda Emergency Cache",
        location: (29.0320, 40.9850),
        address: "Moda Cad. 78, Kadıköy, İstanbul",
        capacity: 3000,
        manager: "Zeynep Demir",
        phone: "+90 216 987 6543",
        operating_hours: "24/7",
        equipment: ["backup generator", "medical supplies area"],
    },
    WarehouseSeed {
        name: "Ortaköy Relief Center",
        location: (29.0145, 41.0520),
        address: "Ortaköy Mahallesi, Beşiktaş, İstanbul",
        capacity: 4500,
        manager: "İbrahim Yıldız",
        phone: "+90 212 456 7890",
        operating_hours: "07:00-19:00",
        equipment: ["sorting area", "packaging station"],
    },
    WarehouseSeed {
        name: "Fenerbahçe Storage Depot",
        location: (29.0450, 40.9750),
        address: "Fenerbahçe Mahallesi, Kadıköy, İstanbul",
        capacity: 6000,
        manager: "Leyla Özdemir",
        phone: "+90 216 654 3210",
        operating_hours: "08:00-17:00",
        equipment: ["climate control", "inventory system"],
    },
];

pub const SAFE_ZONES: [SafeZoneSeed; 3] = [
    SafeZoneSeed {
        name: "Kadıköy Central Safe Zone",
        capacity: 5000,
        status: "verified",
        bounds: Bounds {
            min_lon: 29.0150,
            max_lon: 29.0350,
            min_lat: 40.9800,
            max_lat: 41.0000,
        },
        zone_type: "public_park",
        facilities: &["water source", "shelter", "medical tent"],
        last_verified: "2024-12-20",
    },
    SafeZoneSeed {
        name: "Beşiktaş Coastal Safe Zone",
        capacity: 8000,
        status: "verified",
        bounds: Bounds {
            min_lon: 28.9900,
            max_lon: 29.0200,
            min_lat: 41.0350,
            max_lat: 41.0600,
        },
        zone_type: "beachfront",
        facilities: &["open space", "fresh water station", "evacuation route"],
        last_verified: "2024-12-22",
    },
    SafeZoneSeed {
        name: "Moda-Yeldeğirmeni Safe Corridor",
        capacity: 3500,
        status: "pending_verification",
        bounds: Bounds {
            min_lon: 29.0200,
            max_lon: 29.0550,
            min_lat: 40.9700,
            max_lat: 40.9950,
        },
        zone_type: "street_corridor",
        facilities: &["clear path", "checkpoints"],
        last_verified: "2024-12-18",
    },
];

pub const ITEMS: [ItemSeed; 6] = [
    ItemSeed { sku: "SHL-BLANKET", name: "Blanket", unit: "piece", category: "shelter" },
    ItemSeed { sku: "HYD-WATER-L", name: "Water (liter)", unit: "liter", category: "hydration" },
    ItemSeed { sku: "MED-KIT", name: "Medical Kit", unit: "piece", category: "medical" },
    ItemSeed { sku: "FOOD-PACKAGE", name: "Food Package", unit: "box", category: "food" },
    ItemSeed { sku: "SHL-TENT", name: "Tent", unit: "piece", category: "shelter" },
    ItemSeed { sku: "MED-FIRST-AID", name: "First Aid Supplies", unit: "pack", category: "medical" },
];

/// `(warehouse index, [(item index, quantity)])`
pub const INVENTORY: [(usize, &[(usize, i32)]); 5] = [
    (0, &[(0, 500), (1, 2000), (2, 50)]),
    (1, &[(0, 800), (1, 3000), (2, 100), (3, 400), (4, 30)]),
    (2, &[(2, 150), (5, 200), (1, 500)]),
    (3, &[(0, 600), (1, 2500), (3, 300), (4, 25)]),
    (4, &[(0, 700), (1, 2200), (2, 75), (3, 350)]),
];

impl WarehouseSeed {
    fn metadata(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("manager".into(), json!(self.manager));
        data.insert("phone".into(), json!(self.phone));
        data.insert("operating_hours".into(), json!(self.operating_hours));
        data.insert("equipment".into(), json!(self.equipment));
        data
    }
}

impl SafeZoneSeed {
    fn metadata(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("type".into(), json!(self.zone_type));
        data.insert("facilities".into(), json!(self.facilities));
        data.insert("last_verified".into(), json!(self.last_verified));
        data
    }
}

/// Counts of rows inserted by one seeding run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub warehouses: usize,
    pub safe_zones: usize,
    pub items: usize,
    pub inventory_links: usize,
}

/// Inserts the sample data that is not already present.
pub async fn run(db: &Database) -> Result<SeedReport, sqlx::Error> {
    let mut report = SeedReport::default();

    let warehouse_repo = WarehouseRepository::new(db);
    let mut warehouse_ids = Vec::with_capacity(WAREHOUSES.len());
    for seed in &WAREHOUSES {
        let id = match warehouse_repo.find_by_name(seed.name).await? {
            Some(existing) => existing.id,
            None => {
                let (lon, lat) = seed.location;
                let created = warehouse_repo
                    .create(NewWarehouse {
                        name: seed.name,
                        location: Point::new(lon, lat),
                        address: Some(seed.address),
                        capacity: Some(seed.capacity),
                        status: "active",
                        data: Some(seed.metadata()),
                    })
                    .await?;
                info!(name = seed.name, lon, lat, "Seeded warehouse");
                report.warehouses += 1;
                created.id
            }
        };
        warehouse_ids.push(id);
    }

    let zone_repo = SafeZoneRepository::new(db);
    for seed in &SAFE_ZONES {
        if zone_repo.find_by_name(seed.name).await?.is_some() {
            continue;
        }
        let geometry: Polygon<f64> = seed.bounds.to_polygon();
        zone_repo
            .create(NewSafeZone {
                name: seed.name,
                geometry,
                capacity: Some(seed.capacity),
                capacity_type: "persons",
                status: seed.status,
                data: Some(seed.metadata()),
            })
            .await?;
        info!(name = seed.name, "Seeded safe zone");
        report.safe_zones += 1;
    }

    let item_repo = ItemRepository::new(db.pool().clone());
    let mut item_ids = Vec::with_capacity(ITEMS.len());
    for seed in &ITEMS {
        let id = match item_repo.find_by_sku(seed.sku).await? {
            Some(existing) => existing.id,
            None => {
                let created = item_repo
                    .create(seed.sku, seed.name, None, seed.unit, Some(seed.category))
                    .await?;
                info!(sku = seed.sku, name = seed.name, "Seeded item");
                report.items += 1;
                created.id
            }
        };
        item_ids.push(id);
    }

    let inventory_repo = InventoryRepository::new(db.pool().clone());
    for (warehouse_index, stock) in INVENTORY {
        for &(item_index, quantity) in stock {
            let inserted = inventory_repo
                .insert_if_absent(warehouse_ids[warehouse_index], item_ids[item_index], quantity)
                .await?;
            if inserted {
                report.inventory_links += 1;
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_indices_in_range() {
        for (warehouse_index, stock) in INVENTORY {
            assert!(warehouse_index < WAREHOUSES.len());
            for &(item_index, quantity) in stock {
                assert!(item_index < ITEMS.len());
                assert!(quantity > 0);
            }
        }
    }

    #[test]
    fn test_seed_coordinates_are_valid_lon_lat() {
        for seed in &WAREHOUSES {
            let (lon, lat) = seed.location;
            assert!(shared::validation::validate_longitude(lon).is_ok());
            assert!(shared::validation::validate_latitude(lat).is_ok());
        }
        for seed in &SAFE_ZONES {
            assert!(seed.bounds.min_lon < seed.bounds.max_lon);
            assert!(seed.bounds.min_lat < seed.bounds.max_lat);
        }
    }

    #[test]
    fn test_safe_zone_polygon_matches_ring_order() {
        let ring: Vec<(f64, f64)> = SAFE_ZONES[0]
            .bounds
            .to_polygon()
            .exterior()
            .coords()
            .map(|c| (c.x, c.y))
            .collect();
        assert_eq!(ring.first(), Some(&(29.0150, 40.9800)));
        assert_eq!(ring[2], (29.0350, 41.0000));
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_warehouse_metadata() {
        let data = WAREHOUSES[2].metadata();
        assert_eq!(data["operating_hours"], json!("24/7"));
        assert_eq!(data["equipment"], json!(["backup generator", "medical supplies area"]));
        assert!(!data.contains_key("location"));
    }
}
