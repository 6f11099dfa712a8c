//! [`Filing`] implementations for the crate's return payloads.

use super::simulator::{Filing, ReturnKind};

#[cfg(feature = "ingest")]
impl Filing for crate::ingest::InvoiceBook {
    fn return_kind(&self) -> ReturnKind {
        ReturnKind::Gstr1
    }

    /// Ready once there is at least one invoice and every invoice validated.
    fn check_ready(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("no invoices uploaded".into());
        }
        let counts = self.counts();
        if counts.error > 0 {
            return Err(format!("{} invoice(s) failed validation", counts.error));
        }
        if counts.pending > 0 {
            return Err(format!("{} invoice(s) not yet validated", counts.pending));
        }
        Ok(())
    }
}

/// Consistency checks shared by the monthly and annual returns.
#[cfg(feature = "returns")]
fn check_consistent(
    outward: &crate::returns::Table31,
    itc_available: &crate::core::TaxAmounts,
    itc_reversed: &crate::core::TaxAmounts,
) -> Result<(), String> {
    if itc_reversed.gst_total() > itc_available.gst_total() {
        return Err("ITC reversed exceeds ITC available".into());
    }
    if outward.taxable_value.is_zero() && !outward.tax.is_zero() {
        return Err("outward tax reported without any taxable value".into());
    }
    Ok(())
}

#[cfg(feature = "returns")]
impl Filing for crate::returns::Gstr3bSummary {
    fn return_kind(&self) -> ReturnKind {
        ReturnKind::Gstr3b
    }

    fn check_ready(&self) -> Result<(), String> {
        check_consistent(&self.table_3_1, &self.table_4.available, &self.table_4.reversed)
    }
}

#[cfg(feature = "returns")]
impl Filing for crate::returns::Gstr9Summary {
    fn return_kind(&self) -> ReturnKind {
        ReturnKind::Gstr9
    }

    fn check_ready(&self) -> Result<(), String> {
        check_consistent(&self.outward, &self.itc_availed, &self.itc_reversed)
    }
}

#[cfg(all(test, feature = "ingest"))]
mod tests {
    use super::*;
    use crate::ingest::{InvoiceBook, invoice_template};

    #[test]
    fn book_readiness() {
        let mut book = InvoiceBook::new();
        assert_eq!(book.check_ready().unwrap_err(), "no invoices uploaded");

        book.ingest(&invoice_template()).unwrap();
        assert_eq!(
            book.check_ready().unwrap_err(),
            "2 invoice(s) not yet validated"
        );

        book.validate();
        assert!(book.check_ready().is_ok());
        assert_eq!(book.return_kind(), ReturnKind::Gstr1);
    }

    #[cfg(feature = "returns")]
    mod returns {
        use super::super::*;
        use crate::core::{InwardSupplyRecord, OutwardSupplyRecord, SupplyType, TaxAmounts};
        use crate::returns::{Gstr3bSummary, Gstr9Summary};
        use rust_decimal::Decimal;
        use rust_decimal_macros::dec;

        fn sale() -> OutwardSupplyRecord {
            OutwardSupplyRecord::new(
                SupplyType::B2B,
                dec!(10000),
                TaxAmounts::new(dec!(900), dec!(900), dec!(0), dec!(0)),
            )
        }

        fn purchase(reversed: Decimal) -> InwardSupplyRecord {
            InwardSupplyRecord::new(
                dec!(5000),
                TaxAmounts::new(dec!(450), dec!(450), dec!(0), dec!(0)),
                dec!(900),
                reversed,
            )
        }

        #[test]
        fn gstr9_ready_when_consistent() {
            let s = Gstr9Summary::compute(&[sale()], &[purchase(dec!(100))], &TaxAmounts::ZERO);
            assert!(s.check_ready().is_ok());
            assert_eq!(s.return_kind(), ReturnKind::Gstr9);
        }

        #[test]
        fn gstr9_blocked_by_excess_reversal() {
            let s = Gstr9Summary::compute(&[sale()], &[purchase(dec!(1000))], &TaxAmounts::ZERO);
            assert_eq!(s.check_ready().unwrap_err(), "ITC reversed exceeds ITC available");
        }

        #[test]
        fn tax_without_taxable_value_blocks_both_returns() {
            let odd = OutwardSupplyRecord::new(
                SupplyType::NilRated,
                dec!(1000),
                TaxAmounts::new(dec!(50), dec!(0), dec!(0), dec!(0)),
            );
            let s9 = Gstr9Summary::compute(std::slice::from_ref(&odd), &[], &TaxAmounts::ZERO);
            assert!(s9.check_ready().unwrap_err().contains("without any taxable value"));
            let s3b = Gstr3bSummary::compute(&[odd], &[]);
            assert!(s3b.check_ready().is_err());
        }
    }
}
