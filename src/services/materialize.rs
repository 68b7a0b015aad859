//! Mapping between the logical quotation document and the denormalized
//! storage rows.
//!
//! Writes flatten one document into N rows (one per line, header fields
//! duplicated onto each). Reads reverse the flattening: header from the
//! first row, one line per row. A document with no lines still persists as a
//! single header-only placeholder row so the header survives storage.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::entities::quotation_row;
use crate::models::{
    AddressBlock, LineItem, QuotationHeader, QuotationStatus, QuotationTotals, Surcharges,
    TaxPercents,
};

/// A storage row populated entirely with schema defaults: empty strings,
/// zero numerics, serial number 1 and the fixed legacy markers. Every
/// materialized row starts from this and is then overwritten by header and
/// line fields in that order.
pub fn default_row(now: DateTime<Utc>) -> quotation_row::Model {
    quotation_row::Model {
        id: 0,
        quot_id: 0,
        lead_id: 0,
        quot_no: String::new(),
        s_no: 1,

        date: Some(now.date_naive()),
        status: QuotationStatus::Draft.as_str().to_string(),
        customer_id: 0,
        contact_person_name: String::new(),
        contact_no: String::new(),
        email_id: String::new(),
        address: String::new(),
        billing_pin_code: String::new(),
        billing_building_no: String::new(),
        billing_area: String::new(),
        billing_landmark: String::new(),
        billing_locality: String::new(),
        billing_city: String::new(),
        billing_state: String::new(),
        billing_country: String::new(),
        delivery_pin_code: String::new(),
        delivery_building_no: String::new(),
        delivery_area: String::new(),
        delivery_landmark: String::new(),
        delivery_locality: String::new(),
        delivery_city: String::new(),
        delivery_state: String::new(),
        delivery_country: String::new(),
        term_condition: String::new(),
        quotation_sub: String::new(),
        remark: String::new(),
        activity: String::new(),
        next_date: None,
        packaging: Decimal::ZERO,
        loading: Decimal::ZERO,
        transport: Decimal::ZERO,
        unloading: Decimal::ZERO,
        installation: Decimal::ZERO,
        transport_in_product: Decimal::ZERO,
        transport_type: String::new(),
        installation_type: String::new(),
        gst_sgst_per: Decimal::ZERO,
        gst_sgst: Decimal::ZERO,
        gst_cgst_per: Decimal::ZERO,
        gst_cgst: Decimal::ZERO,
        gst_igst_per: Decimal::ZERO,
        gst_igst: Decimal::ZERO,
        gst_service_sgst_per: Decimal::ZERO,
        gst_service_sgst: Decimal::ZERO,
        gst_service_cgst_per: Decimal::ZERO,
        gst_service_cgst: Decimal::ZERO,
        subtotal: Decimal::ZERO,
        grand_total: Decimal::ZERO,
        advance: Decimal::ZERO,
        balance: Decimal::ZERO,

        pro_id: String::new(),
        pro_code: String::new(),
        pro_image: String::new(),
        description_head: String::new(),
        pro_dec: String::new(),
        hsn_code: String::new(),
        size: String::new(),
        colour: String::new(),
        qty: 0,
        mrp: Decimal::ZERO,
        discount: Decimal::ZERO,
        discount_per: Decimal::ZERO,
        total: Decimal::ZERO,

        record_type: "Lead".to_string(),
        created_source: "WEBERP".to_string(),
        created_by: String::new(),
        employee_id: 0,
        edited_by: 0,
        edited_no_of_time: 0,
        sorted_order: 0,
        lbt_per: Decimal::ZERO,
        lbt: Decimal::ZERO,
        oct_per: Decimal::ZERO,
        oct: Decimal::ZERO,
        vat_per: Decimal::ZERO,
        vat: Decimal::ZERO,
        cst_per: Decimal::ZERO,
        cst: Decimal::ZERO,
        commission_per: Decimal::ZERO,
        commission_amount: Decimal::ZERO,
        commission_sts: "no".to_string(),
        internal_remark: String::new(),
        rate_remark: String::new(),
        work_order_no: String::new(),
        search_data: String::new(),
        approval_status: String::new(),
        last_update: now,
        edited_date: None,
        expected_delivery_date: None,
    }
}

fn apply_header(row: &mut quotation_row::Model, header: &QuotationHeader, totals: &QuotationTotals) {
    row.quot_no = header.quot_no.clone();
    row.lead_id = header.lead_id;
    row.date = header.date;
    row.status = header.status.as_str().to_string();
    row.customer_id = header.customer_id;
    row.contact_person_name = header.contact_person_name.clone();
    row.contact_no = header.contact_no.clone();
    row.email_id = header.email_id.clone();
    row.address = header.address.clone();

    row.billing_pin_code = header.billing.pin_code.clone();
    row.billing_building_no = header.billing.building_no.clone();
    row.billing_area = header.billing.area.clone();
    row.billing_landmark = header.billing.landmark.clone();
    row.billing_locality = header.billing.locality.clone();
    row.billing_city = header.billing.city.clone();
    row.billing_state = header.billing.state.clone();
    row.billing_country = header.billing.country.clone();
    row.delivery_pin_code = header.delivery.pin_code.clone();
    row.delivery_building_no = header.delivery.building_no.clone();
    row.delivery_area = header.delivery.area.clone();
    row.delivery_landmark = header.delivery.landmark.clone();
    row.delivery_locality = header.delivery.locality.clone();
    row.delivery_city = header.delivery.city.clone();
    row.delivery_state = header.delivery.state.clone();
    row.delivery_country = header.delivery.country.clone();

    row.term_condition = header.terms.clone();
    row.quotation_sub = header.subject.clone();
    row.remark = header.remark.clone();
    row.activity = header.activity.clone();
    row.next_date = header.next_date;

    row.packaging = header.surcharges.packaging;
    row.loading = header.surcharges.loading;
    row.transport = header.surcharges.transport;
    row.unloading = header.surcharges.unloading;
    row.installation = header.surcharges.installation;

    row.gst_sgst_per = header.tax_percents.sgst;
    row.gst_cgst_per = header.tax_percents.cgst;
    row.gst_igst_per = header.tax_percents.igst;
    row.gst_service_sgst_per = header.tax_percents.service_sgst;
    row.gst_service_cgst_per = header.tax_percents.service_cgst;

    row.gst_sgst = totals.sgst_amount;
    row.gst_cgst = totals.cgst_amount;
    row.gst_igst = totals.igst_amount;
    row.gst_service_sgst = totals.service_sgst_amount;
    row.gst_service_cgst = totals.service_cgst_amount;
    row.subtotal = totals.subtotal;
    row.grand_total = totals.grand_total;
    row.advance = header.advance;
    row.balance = totals.balance;
}

fn apply_line(row: &mut quotation_row::Model, line: &LineItem) {
    row.pro_id = line.product_id.clone();
    row.pro_image = line.image_path.clone().unwrap_or_default();
    row.description_head = line.description_head.clone();
    row.pro_dec = line.description.clone();
    row.hsn_code = line.hsn_code.clone();
    row.size = line.size.clone();
    row.colour = line.colour.clone();
    row.qty = line.quantity;
    row.mrp = line.unit_price;
    row.discount = line.discount_amount;
    row.discount_per = line.discount_percent;
    row.total = line.computed_total;
}

/// Flatten one document into its storage rows.
///
/// Row ids are `base_row_id + i`, contiguous across the batch; `s_no`
/// restarts at 1 per document. `lines` must already carry recomputed
/// `computed_total` values. An empty line set yields exactly one
/// header-only placeholder row.
pub fn materialize_rows(
    header: &QuotationHeader,
    lines: &[LineItem],
    totals: &QuotationTotals,
    quot_id: i64,
    base_row_id: i64,
    now: DateTime<Utc>,
) -> Vec<quotation_row::Model> {
    let mut rows = Vec::with_capacity(lines.len().max(1));
    if lines.is_empty() {
        let mut row = default_row(now);
        apply_header(&mut row, header, totals);
        row.id = base_row_id;
        row.quot_id = quot_id;
        row.s_no = 1;
        rows.push(row);
        return rows;
    }
    for (i, line) in lines.iter().enumerate() {
        let mut row = default_row(now);
        apply_header(&mut row, header, totals);
        apply_line(&mut row, line);
        row.id = base_row_id + i as i64;
        row.quot_id = quot_id;
        row.s_no = (i + 1) as i32;
        rows.push(row);
    }
    rows
}

fn is_placeholder(row: &quotation_row::Model) -> bool {
    row.pro_id.is_empty()
        && row.pro_dec.is_empty()
        && row.description_head.is_empty()
        && row.qty == 0
        && row.mrp == Decimal::ZERO
}

/// Rebuild the logical document from its rows, which must belong to one
/// `quot_id` and be ordered by row id ascending. Header fields come from the
/// first row; each non-placeholder row contributes one line. Returns `None`
/// for an empty slice.
pub fn assemble_document(
    rows: &[quotation_row::Model],
) -> Option<(QuotationHeader, Vec<LineItem>, QuotationTotals)> {
    let first = rows.first()?;

    let header = QuotationHeader {
        quot_no: first.quot_no.clone(),
        lead_id: first.lead_id,
        date: first.date,
        status: QuotationStatus::parse(&first.status),
        customer_id: first.customer_id,
        contact_person_name: first.contact_person_name.clone(),
        contact_no: first.contact_no.clone(),
        email_id: first.email_id.clone(),
        address: first.address.clone(),
        billing: AddressBlock {
            pin_code: first.billing_pin_code.clone(),
            building_no: first.billing_building_no.clone(),
            area: first.billing_area.clone(),
            landmark: first.billing_landmark.clone(),
            locality: first.billing_locality.clone(),
            city: first.billing_city.clone(),
            state: first.billing_state.clone(),
            country: first.billing_country.clone(),
        },
        delivery: AddressBlock {
            pin_code: first.delivery_pin_code.clone(),
            building_no: first.delivery_building_no.clone(),
            area: first.delivery_area.clone(),
            landmark: first.delivery_landmark.clone(),
            locality: first.delivery_locality.clone(),
            city: first.delivery_city.clone(),
            state: first.delivery_state.clone(),
            country: first.delivery_country.clone(),
        },
        terms: first.term_condition.clone(),
        subject: first.quotation_sub.clone(),
        remark: first.remark.clone(),
        activity: first.activity.clone(),
        next_date: first.next_date,
        surcharges: Surcharges {
            packaging: first.packaging,
            loading: first.loading,
            transport: first.transport,
            unloading: first.unloading,
            installation: first.installation,
        },
        tax_percents: TaxPercents {
            sgst: first.gst_sgst_per,
            cgst: first.gst_cgst_per,
            igst: first.gst_igst_per,
            service_sgst: first.gst_service_sgst_per,
            service_cgst: first.gst_service_cgst_per,
        },
        advance: first.advance,
    };

    let totals = QuotationTotals {
        subtotal: first.subtotal,
        sgst_amount: first.gst_sgst,
        cgst_amount: first.gst_cgst,
        igst_amount: first.gst_igst,
        service_sgst_amount: first.gst_service_sgst,
        service_cgst_amount: first.gst_service_cgst,
        grand_total: first.grand_total,
        balance: first.balance,
    };

    let lines = rows
        .iter()
        .filter(|row| !is_placeholder(row))
        .map(|row| LineItem {
            product_id: row.pro_id.clone(),
            description_head: row.description_head.clone(),
            description: row.pro_dec.clone(),
            hsn_code: row.hsn_code.clone(),
            size: row.size.clone(),
            colour: row.colour.clone(),
            quantity: row.qty,
            unit_price: row.mrp,
            discount_amount: row.discount,
            discount_percent: row.discount_per,
            computed_total: row.total,
            image_path: if row.pro_image.is_empty() {
                None
            } else {
                Some(row.pro_image.clone())
            },
        })
        .collect();

    Some((header, lines, totals))
}

/// All rows of one revision of a lead's quotation.
#[derive(Clone, Debug)]
pub struct RevisionGroup {
    pub quot_id: i64,
    pub rows: Vec<quotation_row::Model>,
}

impl RevisionGroup {
    fn max_row_id(&self) -> i64 {
        self.rows.iter().map(|r| r.id).max().unwrap_or(0)
    }
}

/// Partition one lead's rows into its revisions. The group holding the
/// highest row id is the current revision; the rest is history, newest
/// first. Rows within each group keep ascending id order.
pub fn lead_revisions(
    mut rows: Vec<quotation_row::Model>,
) -> Option<(RevisionGroup, Vec<RevisionGroup>)> {
    if rows.is_empty() {
        return None;
    }
    rows.sort_by_key(|r| r.id);

    let mut groups: Vec<RevisionGroup> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|g| g.quot_id == row.quot_id) {
            Some(group) => group.rows.push(row),
            None => groups.push(RevisionGroup {
                quot_id: row.quot_id,
                rows: vec![row],
            }),
        }
    }

    let current_idx = groups
        .iter()
        .enumerate()
        .max_by_key(|(_, g)| g.max_row_id())
        .map(|(i, _)| i)?;
    let current = groups.remove(current_idx);
    let mut history = groups;
    history.sort_by_key(|g| std::cmp::Reverse(g.max_row_id()));
    Some((current, history))
}
