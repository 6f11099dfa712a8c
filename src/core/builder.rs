use rust_decimal::Decimal;

use super::types::*;

/// Builder for [`InvoiceRecord`] values outside the upload path
/// (manual entry, mock data, tests).
///
/// ```
/// use gst_filing::core::*;
/// use rust_decimal_macros::dec;
///
/// let record = InvoiceRecordBuilder::new("INV-001", "2024-06-15", "Acme Traders")
///     .amounts(dec!(10000), dec!(0), dec!(0), dec!(1800))
///     .hsn("998314", "IT consulting")
///     .category(InvoiceCategory::B2B)
///     .build();
///
/// // invoice value defaults to taxable value plus tax
/// assert_eq!(record.invoice_value, dec!(11800));
/// assert_eq!(record.status, RecordStatus::Pending);
/// ```
pub struct InvoiceRecordBuilder {
    id: Option<String>,
    invoice_number: String,
    invoice_date: String,
    customer_name: String,
    customer_gstin: String,
    place_of_supply: String,
    invoice_value: Option<Decimal>,
    taxable_value: Decimal,
    cgst_rate: Decimal,
    cgst_amount: Decimal,
    sgst_rate: Decimal,
    sgst_amount: Decimal,
    igst_rate: Decimal,
    igst_amount: Decimal,
    hsn_code: String,
    description: String,
    quantity: Decimal,
    rate: Decimal,
    category: Option<InvoiceCategory>,
}

impl InvoiceRecordBuilder {
    pub fn new(
        invoice_number: impl Into<String>,
        invoice_date: impl Into<String>,
        customer_name: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            invoice_number: invoice_number.into(),
            invoice_date: invoice_date.into(),
            customer_name: customer_name.into(),
            customer_gstin: String::new(),
            place_of_supply: String::new(),
            invoice_value: None,
            taxable_value: Decimal::ZERO,
            cgst_rate: Decimal::ZERO,
            cgst_amount: Decimal::ZERO,
            sgst_rate: Decimal::ZERO,
            sgst_amount: Decimal::ZERO,
            igst_rate: Decimal::ZERO,
            igst_amount: Decimal::ZERO,
            hsn_code: String::new(),
            description: String::new(),
            quantity: Decimal::ONE,
            rate: Decimal::ZERO,
            category: None,
        }
    }

    /// Override the synthesized id (defaults to the invoice number).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn gstin(mut self, gstin: impl Into<String>) -> Self {
        self.customer_gstin = gstin.into();
        self
    }

    pub fn place_of_supply(mut self, place: impl Into<String>) -> Self {
        self.place_of_supply = place.into();
        self
    }

    /// Set taxable value and the three tax head amounts.
    pub fn amounts(mut self, taxable: Decimal, cgst: Decimal, sgst: Decimal, igst: Decimal) -> Self {
        self.taxable_value = taxable;
        self.cgst_amount = cgst;
        self.sgst_amount = sgst;
        self.igst_amount = igst;
        self
    }

    /// Set the per-head tax rates (percent).
    pub fn rates(mut self, cgst: Decimal, sgst: Decimal, igst: Decimal) -> Self {
        self.cgst_rate = cgst;
        self.sgst_rate = sgst;
        self.igst_rate = igst;
        self
    }

    /// Set the invoice value explicitly (defaults to taxable value + tax).
    pub fn invoice_value(mut self, value: Decimal) -> Self {
        self.invoice_value = Some(value);
        self
    }

    pub fn hsn(mut self, code: impl Into<String>, description: impl Into<String>) -> Self {
        self.hsn_code = code.into();
        self.description = description.into();
        self
    }

    pub fn quantity(mut self, quantity: Decimal, rate: Decimal) -> Self {
        self.quantity = quantity;
        self.rate = rate;
        self
    }

    pub fn category(mut self, category: InvoiceCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Build a pending (unvalidated) record.
    pub fn build(self) -> InvoiceRecord {
        let invoice_value = self.invoice_value.unwrap_or_else(|| {
            self.taxable_value
                .saturating_add(self.cgst_amount)
                .saturating_add(self.sgst_amount)
                .saturating_add(self.igst_amount)
        });
        InvoiceRecord {
            id: self.id.unwrap_or_else(|| self.invoice_number.clone()),
            invoice_number: self.invoice_number,
            invoice_date: self.invoice_date,
            customer_name: self.customer_name,
            customer_gstin: self.customer_gstin,
            place_of_supply: self.place_of_supply,
            invoice_value,
            taxable_value: self.taxable_value,
            cgst_rate: self.cgst_rate,
            cgst_amount: self.cgst_amount,
            sgst_rate: self.sgst_rate,
            sgst_amount: self.sgst_amount,
            igst_rate: self.igst_rate,
            igst_amount: self.igst_amount,
            hsn_code: self.hsn_code,
            description: self.description,
            quantity: self.quantity,
            rate: self.rate,
            category: self.category,
            errors: Vec::new(),
            status: RecordStatus::Pending,
        }
    }
}
