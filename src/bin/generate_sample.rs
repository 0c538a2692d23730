//! Writes a small deterministic restaurant listings dataset, as both CSV
//! and Parquet, containing every dirty shape the normalizer repairs:
//! `"4.1/5"` ratings, the `NEW` / `-` / `Not Rated` sentinels, comma-grouped
//! costs, blank cells, and one Latin-1 encoded name in the CSV output.

use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

struct SampleListing {
    name: &'static str,
    online_order: &'static str,
    rate: &'static str,
    votes: Option<i64>,
    location: &'static str,
    cuisines: &'static str,
    cost_for_two: &'static str,
}

const LISTINGS: &[SampleListing] = &[
    SampleListing {
        name: "Jalsa",
        online_order: "Yes",
        rate: "4.1/5",
        votes: Some(775),
        location: "Banashankari",
        cuisines: "North Indian, Mughlai, Chinese",
        cost_for_two: "800",
    },
    SampleListing {
        name: "Spice Elephant",
        online_order: "Yes",
        rate: "4.1/5",
        votes: Some(787),
        location: "Banashankari",
        cuisines: "Chinese, North Indian, Thai",
        cost_for_two: "800",
    },
    SampleListing {
        name: "San Churro Cafe",
        online_order: "Yes",
        rate: "3.8/5",
        votes: Some(918),
        location: "Banashankari",
        cuisines: "Cafe, Mexican, Italian",
        cost_for_two: "800",
    },
    SampleListing {
        name: "Addhuri Udupi Bhojana",
        online_order: "No",
        rate: "3.7/5",
        votes: Some(88),
        location: "Banashankari",
        cuisines: "South Indian, North Indian",
        cost_for_two: "300",
    },
    SampleListing {
        name: "Grand Village",
        online_order: "No",
        rate: "3.8/5",
        votes: Some(166),
        location: "Basavanagudi",
        cuisines: "North Indian, Rajasthani",
        cost_for_two: "600",
    },
    SampleListing {
        name: "Timepass Dinner",
        online_order: "Yes",
        rate: "NEW",
        votes: Some(0),
        location: "Basavanagudi",
        cuisines: "North Indian",
        cost_for_two: "600",
    },
    SampleListing {
        name: "Onesta",
        online_order: "Yes",
        rate: "4.6/5",
        votes: Some(2556),
        location: "Banashankari",
        cuisines: "Pizza, Cafe, Italian",
        cost_for_two: "600",
    },
    SampleListing {
        name: "Penthouse Cafe",
        online_order: "Yes",
        rate: "-",
        votes: Some(324),
        location: "BTM",
        cuisines: "Cafe, Italian",
        cost_for_two: "700",
    },
    SampleListing {
        // In the CSV output the e-acute is written as the Latin-1 byte
        // 0xE9, matching the source dataset's Western European export.
        name: "Caf\u{e9} Shuffle",
        online_order: "Yes",
        rate: "4.2/5",
        votes: Some(150),
        location: "BTM",
        cuisines: "Cafe, Italian, Continental",
        cost_for_two: "1,500",
    },
    SampleListing {
        name: "The Coffee Shack",
        online_order: "No",
        rate: "Not Rated",
        votes: Some(11),
        location: "BTM",
        cuisines: "Cafe, Chinese, Continental",
        cost_for_two: "500",
    },
    SampleListing {
        name: "Empire Restaurant",
        online_order: "Yes",
        rate: "4.4/5",
        votes: Some(4884),
        location: "Indiranagar",
        cuisines: "North Indian, Mughlai, South Indian",
        cost_for_two: "750",
    },
    SampleListing {
        name: "Meghana Foods",
        online_order: "Yes",
        rate: "4.4/5",
        votes: Some(4401),
        location: "Indiranagar",
        cuisines: "Biryani, North Indian, Chinese",
        cost_for_two: "1,200",
    },
    SampleListing {
        name: "Petoo",
        online_order: "Yes",
        rate: "",
        votes: None,
        location: "",
        cuisines: "North Indian",
        cost_for_two: "",
    },
];

const HEADER: [&str; 7] = [
    "name",
    "online_order",
    "rate",
    "votes",
    "location",
    "cuisines",
    "approx_cost(for two people)",
];

/// Encode one CSV cell as Latin-1 so the reader's per-cell decoding path
/// gets exercised. Every character in the sample data fits.
fn latin1(s: &str) -> Vec<u8> {
    s.chars().map(|c| c as u32 as u8).collect()
}

fn write_csv(path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer.write_record(HEADER).expect("Failed to write header");

    for listing in LISTINGS {
        let votes = listing.votes.map(|v| v.to_string()).unwrap_or_default();
        let record: [Vec<u8>; 7] = [
            latin1(listing.name),
            listing.online_order.into(),
            listing.rate.into(),
            votes.into_bytes(),
            listing.location.into(),
            listing.cuisines.into(),
            listing.cost_for_two.into(),
        ];
        writer.write_record(&record).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_parquet(path: &str) {
    fn text_column(values: impl Iterator<Item = &'static str>) -> Arc<StringArray> {
        Arc::new(StringArray::from(
            values
                .map(|v| (!v.is_empty()).then_some(v))
                .collect::<Vec<_>>(),
        ))
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("online_order", DataType::Utf8, true),
        Field::new("rate", DataType::Utf8, true),
        Field::new("votes", DataType::Int64, true),
        Field::new("location", DataType::Utf8, true),
        Field::new("cuisines", DataType::Utf8, true),
        Field::new("approx_cost(for two people)", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text_column(LISTINGS.iter().map(|l| l.name)),
            text_column(LISTINGS.iter().map(|l| l.online_order)),
            text_column(LISTINGS.iter().map(|l| l.rate)),
            Arc::new(Int64Array::from(
                LISTINGS.iter().map(|l| l.votes).collect::<Vec<_>>(),
            )),
            text_column(LISTINGS.iter().map(|l| l.location)),
            text_column(LISTINGS.iter().map(|l| l.cuisines)),
            text_column(LISTINGS.iter().map(|l| l.cost_for_two)),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    write_csv("sample_data.csv");
    write_parquet("sample_data.parquet");
    println!(
        "Wrote {} listings to sample_data.csv and sample_data.parquet",
        LISTINGS.len()
    );
}
