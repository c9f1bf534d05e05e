use super::{Column, ImportSchema};

// Aliases are written pre-normalized (lowercase alphanumerics only).

pub const CUSTOMERS: ImportSchema = ImportSchema {
    entity: "customers",
    columns: &[
        Column {
            name: "name",
            aliases: &[
                "nama",
                "namapelanggan",
                "namalengkap",
                "customer",
                "customername",
                "fullname",
            ],
        },
        Column {
            name: "email",
            aliases: &["emailpelanggan", "mail", "emailaddress"],
        },
        Column {
            name: "phone",
            aliases: &[
                "nohp",
                "hp",
                "telepon",
                "telp",
                "notelp",
                "notelepon",
                "noteleponpelanggan",
                "phonenumber",
                "mobile",
                "whatsapp",
                "wa",
            ],
        },
        Column {
            name: "points",
            aliases: &["poin", "point", "totalpoin", "totalpoints", "balance"],
        },
    ],
};

pub const PRODUCTS: ImportSchema = ImportSchema {
    entity: "products",
    columns: &[
        Column {
            name: "name",
            aliases: &["nama", "namaproduk", "product", "productname", "item"],
        },
        Column {
            name: "category",
            aliases: &["kategori", "kategoriproduk", "type"],
        },
        Column {
            name: "notes",
            aliases: &["catatan", "catatanproduk", "note", "description", "deskripsi"],
        },
        Column {
            name: "points",
            aliases: &["poin", "poinpertukaran", "exchangepoints", "pointcost"],
        },
        Column {
            name: "price",
            aliases: &["harga", "hargasatuan", "unitprice"],
        },
    ],
};

pub const MEMBERSHIPS: ImportSchema = ImportSchema {
    entity: "memberships",
    columns: &[
        Column {
            name: "tier",
            aliases: &["tiermembership", "tiername", "membership", "level", "nama", "name"],
        },
        Column {
            name: "requiredpoints",
            aliases: &["requiredpoint", "minpoints", "minimumpoints", "points", "poin"],
        },
        Column {
            name: "discount",
            aliases: &["diskon", "discountpercent", "potongan"],
        },
    ],
};

pub const REWARDS: ImportSchema = ImportSchema {
    entity: "rewards",
    columns: &[
        Column {
            name: "name",
            aliases: &["namareward", "reward", "rewardname", "nama"],
        },
        Column {
            name: "pointsrequired",
            aliases: &["requiredpoints", "points", "poin", "cost"],
        },
        Column {
            name: "stock",
            aliases: &["stok", "qty", "quantity"],
        },
    ],
};

pub const NOTIFICATIONS: ImportSchema = ImportSchema {
    entity: "notifications",
    columns: &[
        Column {
            name: "message",
            aliases: &["pesan", "text", "body", "content"],
        },
        Column {
            name: "customerid",
            aliases: &["idpelanggan", "customer", "pelanggan"],
        },
    ],
};

pub const TRANSACTIONS: ImportSchema = ImportSchema {
    entity: "transactions",
    columns: &[
        Column {
            name: "date",
            aliases: &["tanggal", "tanggaltransaksi", "transactiondate", "datetime", "time"],
        },
        Column {
            name: "product",
            aliases: &["produk", "namaproduk", "productname", "item"],
        },
        Column {
            name: "quantity",
            aliases: &["qty", "jumlah"],
        },
        Column {
            name: "total",
            aliases: &["totalharga", "totalprice", "amount", "totalamount", "subtotal"],
        },
        Column {
            name: "payment",
            aliases: &["metodepembayaran", "paymentmethod", "metode", "method"],
        },
    ],
};
