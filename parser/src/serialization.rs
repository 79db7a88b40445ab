use std::io::Write;
use csv::WriterBuilder;
use serde::Serialize;
use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::model::DepositRecord;
use crate::utils::format_minor_units;

/// Колонки CSV для импорта в учётную систему, в порядке записи
pub const OUTPUT_HEADERS: [&str; 12] = [
    "*SalesReceiptNo",
    "Customer",
    "*SalesReceiptDate",
    "*DepositAccount",
    "Location",
    "Memo",
    "Item(Product/Service)",
    "ItemDescription",
    "ItemQuantity",
    "ItemRate",
    "*ItemAmount",
    "Service Date",
];

/// Одна строка выходного CSV (sales receipt)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "*SalesReceiptNo")]
    pub receipt_no: String,
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "*SalesReceiptDate")]
    pub date: String,
    #[serde(rename = "*DepositAccount")]
    pub deposit_account: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Memo")]
    pub memo: String,
    #[serde(rename = "Item(Product/Service)")]
    pub item: String,
    #[serde(rename = "ItemDescription")]
    pub item_description: String,
    #[serde(rename = "ItemQuantity")]
    pub quantity: String,
    #[serde(rename = "ItemRate")]
    pub rate: String,
    #[serde(rename = "*ItemAmount")]
    pub amount: String,
    #[serde(rename = "Service Date")]
    pub service_date: String,
}

impl OutputRow {
    pub fn from_record(record: &DepositRecord, config: &ExtractorConfig) -> Self {
        let amount = format_minor_units(record.amount);

        OutputRow {
            receipt_no: record.receipt_no.clone(),
            customer: record.customer.clone(),
            date: record.date.clone(),
            deposit_account: config.deposit_account.clone(),
            location: String::new(),
            memo: format!("{} transaction", record.channel),
            item: config.item_name.clone(),
            item_description: String::new(),
            quantity: "1".to_string(),
            rate: amount.clone(),
            amount,
            service_date: record.date.clone(),
        }
    }
}

/// Записывает строки в CSV. Заголовок пишется всегда, даже если строк нет
pub fn write_csv<W: Write>(writer: W, rows: &[OutputRow]) -> Result<(), ExtractError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(OUTPUT_HEADERS)?;
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChannelType;

    fn record() -> DepositRecord {
        DepositRecord {
            raw_date: "01-Jan-2024".into(),
            date: "01/01/2024".into(),
            amount: 50000,
            balance: 1_050_000,
            channel: ChannelType::MPesa,
            customer: "JOHN DOE".into(),
            receipt_no: "S12345".into(),
            text: "01-Jan-2024 MMP/Mpesa From JOHN DOE Ref S12345 500.00 10500.00".into(),
        }
    }

    #[test]
    fn projects_record_into_row() {
        let row = OutputRow::from_record(&record(), &ExtractorConfig::default());

        assert_eq!(row.receipt_no, "S12345");
        assert_eq!(row.customer, "JOHN DOE");
        assert_eq!(row.date, "01/01/2024");
        assert_eq!(row.deposit_account, "I&M Bank");
        assert_eq!(row.memo, "M-Pesa transaction");
        assert_eq!(row.item, "Jaba Juice");
        assert_eq!(row.quantity, "1");
        assert_eq!(row.rate, "500.00");
        assert_eq!(row.amount, "500.00");
        assert_eq!(row.service_date, "01/01/2024");
    }

    #[test]
    fn writes_header_and_rows() {
        let row = OutputRow::from_record(&record(), &ExtractorConfig::default());
        let mut out = Vec::new();
        write_csv(&mut out, &[row]).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("*SalesReceiptNo,Customer,*SalesReceiptDate,*DepositAccount,Location,Memo,Item(Product/Service),ItemDescription,ItemQuantity,ItemRate,*ItemAmount,Service Date")
        );
        assert_eq!(
            lines.next(),
            Some("S12345,JOHN DOE,01/01/2024,I&M Bank,,M-Pesa transaction,Jaba Juice,,1,500.00,500.00,01/01/2024")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_output_still_has_header() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
