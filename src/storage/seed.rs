//! Demo data every session starts from unless `--data` is given

use chrono::NaiveDate;

use crate::models::{
    BillingId, BillingRecord, BillingStatus, MessageTemplate, Money, Property, PropertyId,
    TemplateId, Tenant, TenantId, TenantStatus,
};

use super::{Repository, Storage};

pub const REMINDER_BODY: &str = "Olá {nome}, lembro que o aluguel no valor de R$ {valor} vence no dia {vencimento}. Para sua comodidade, segue o link para pagamento via PIX: {link_pix}. Obrigado!";

pub const RECEIPT_BODY: &str = "Olá {nome}, confirmamos o recebimento do pagamento de aluguel no valor de R$ {valor} referente ao imóvel {imovel}. Obrigado pela pontualidade!";

pub const LATE_NOTICE_BODY: &str = "Olá {nome}, notamos que o aluguel no valor de R$ {valor} vencido no dia {vencimento} ainda não foi pago. Por favor, regularize sua situação ou entre em contato caso precise de algum prazo adicional.";

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap_or_default()
}

struct DemoTenant {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
    kind: &'static str,
    rooms: u32,
    rent: i64,
    due_day: u8,
    status: TenantStatus,
}

const DEMO_TENANTS: [DemoTenant; 3] = [
    DemoTenant {
        name: "João Silva",
        email: "joao@email.com",
        phone: "(11) 99999-9999",
        address: "Rua das Flores, 123 - Centro",
        kind: "Apartamento",
        rooms: 2,
        rent: 850,
        due_day: 5,
        status: TenantStatus::Active,
    },
    DemoTenant {
        name: "Maria Santos",
        email: "maria@email.com",
        phone: "(11) 88888-8888",
        address: "Av. Principal, 456 - Jardins",
        kind: "Casa",
        rooms: 3,
        rent: 1200,
        due_day: 10,
        status: TenantStatus::Active,
    },
    DemoTenant {
        name: "Pedro Costa",
        email: "pedro@email.com",
        phone: "(11) 77777-7777",
        address: "Rua Nova, 789 - Vila Nova",
        kind: "Apartamento",
        rooms: 1,
        rent: 750,
        due_day: 15,
        status: TenantStatus::Late,
    },
];

/// Storage populated with the demo properties, tenants, charges and templates
pub fn demo_storage() -> Storage {
    let mut properties = Vec::new();
    let mut tenants = Vec::new();

    for (seq, demo) in (1u64..).zip(DEMO_TENANTS.iter()) {
        let rent = Money::from_reais(demo.rent);

        properties.push(
            Property::new(PropertyId::new(seq), demo.address, demo.kind, demo.rooms, rent)
                .occupied_by(demo.name),
        );

        let mut tenant = Tenant::new(
            TenantId::new(seq),
            demo.name,
            demo.email,
            demo.phone,
            demo.address,
            rent,
            demo.due_day,
        );
        tenant.status = demo.status;
        tenants.push(tenant);
    }

    let mut paid = BillingRecord::new(
        BillingId::new(1),
        "João Silva",
        "Apt 101 - Centro",
        Money::from_reais(850),
        march(5),
        BillingStatus::Paid,
    )
    .with_reminder_sent();
    paid.payment_date = Some(march(4));

    let billings = vec![
        paid,
        BillingRecord::new(
            BillingId::new(2),
            "Maria Santos",
            "Casa - Jardins",
            Money::from_reais(1200),
            march(10),
            BillingStatus::Pending,
        )
        .with_reminder_sent(),
        BillingRecord::new(
            BillingId::new(3),
            "Pedro Costa",
            "Apt 205 - Vila Nova",
            Money::from_reais(750),
            march(2),
            BillingStatus::Overdue,
        ),
        BillingRecord::new(
            BillingId::new(4),
            "Ana Paula",
            "Casa - Centro",
            Money::from_reais(950),
            march(15),
            BillingStatus::Scheduled,
        ),
    ];

    let templates: Vec<MessageTemplate> = [
        ("Lembrete de Aluguel", REMINDER_BODY),
        ("Confirmação de Pagamento", RECEIPT_BODY),
        ("Aluguel Atrasado", LATE_NOTICE_BODY),
    ]
    .into_iter()
    .zip(1u64..)
    .map(|((name, body), seq)| MessageTemplate::new(TemplateId::new(seq), name, body))
    .collect();

    Storage {
        properties: Repository::from_ordered(properties),
        tenants: Repository::from_ordered(tenants),
        billings: Repository::from_ordered(billings),
        templates: Repository::from_ordered(templates),
    }
}
