//! Default Inspection Template
//!
//! Used when nothing was saved yet, or the saved copy could not be read.

use crate::models::{ChecklistItem, Inspection, PhotoItem, Section, Subsection};

/// Stable id of the template inspection, so a saved working copy is found again.
/// Remote tables key inspections by UUID, so this must parse as one.
pub const DEFAULT_INSPECTION_ID: &str = "00000000-0000-4000-8000-000000000001";
pub const DEFAULT_PROPERTY: &str = "Villa Palacio";

fn items(texts: &[&str]) -> Vec<ChecklistItem> {
    texts.iter().map(|t| ChecklistItem::new(*t)).collect()
}

fn subsection(title: &str, texts: &[&str], children: Vec<Subsection>) -> Subsection {
    Subsection {
        items: items(texts),
        subsections: children,
        ..Subsection::new(title)
    }
}

/// Fresh template dated today; every entity gets a new id
pub fn default_inspection() -> Inspection {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut inspection = Inspection::new(DEFAULT_INSPECTION_ID, "Property Inspection", today, DEFAULT_PROPERTY);

    let general = Section {
        items: items(&[
            "Front door and entry hallway clean",
            "Check outdoor light bulb",
            "Doorbell works",
            "Bring a cloth to wipe and dry surfaces",
            "Wifi working, open a new page",
            "Lockbox has the key inside",
        ]),
        photos: vec![PhotoItem::new(
            "https://rxudgxowradykfqfwhkp.supabase.co/storage/v1/object/public/photos/villapalacio/Foto%201.jpg",
            "Foto 1",
        )],
        ..Section::new("General")
    };

    let drawers = subsection(
        "Island Drawers and Cabinets",
        &[],
        vec![
            subsection(
                "First Drawer Right of Stove",
                &["BBQ utensils", "Kitchen tongs", "Whisks", "Lighter"],
                vec![],
            ),
            subsection(
                "Second Drawer Right of Stove",
                &["Pasta strainer", "Salad serving spoons"],
                vec![],
            ),
        ],
    );

    let social = Section {
        subsections: vec![
            subsection(
                "Entrance",
                &[
                    "Umbrella",
                    "Check light bulbs",
                    "Fire extinguisher",
                    "4 pool towels with notice",
                    "Mirror and table clean",
                ],
                vec![],
            ),
            subsection(
                "Kitchen",
                &["Glasses, plates and pots clean", "Check light bulbs", "2 hand towels"],
                vec![drawers],
            ),
        ],
        ..Section::new("Social Areas")
    };

    inspection.sections = vec![general, social];
    inspection
}
