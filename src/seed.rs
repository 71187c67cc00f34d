//! 示例数据
//!
//! 服务启动时载入内存表，没有持久化。

use chrono::{DateTime, TimeZone, Utc};

use crate::app::{
    admin::model::{SiteSettings, SocialMedia},
    catalog::model::{Category, Product},
    inbox::model::Message,
};

pub fn categories() -> Vec<Category> {
    [
        ("fruits", "Frutas", "Frutas frescas de temporada"),
        ("vegetables", "Verduras", "Verduras frescas de productores locales"),
        ("dairy", "Lácteos", "Productos lácteos de alta calidad"),
        ("meats", "Carnes", "Carnes frescas y procesadas"),
        ("frozen", "Congelados", "Productos congelados para su conveniencia"),
        ("groceries", "Abarrotes", "Productos de despensa para su negocio"),
    ]
    .into_iter()
    .map(|(id, name, description)| Category {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: f64,
    photo: &'static str,
    category_id: &'static str,
    featured: bool,
    sale_price: Option<f64>,
    stock: u32,
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Manzanas Rojas",
        description: "Manzanas rojas frescas y jugosas, perfectas para cualquier ocasión.",
        price: 2.99,
        photo: "photo-1570913149827-d2ac84ab3f9a",
        category_id: "fruits",
        featured: true,
        sale_price: None,
        stock: 150,
    },
    SeedProduct {
        name: "Plátanos",
        description: "Plátanos frescos y maduros, fuente ideal de potasio y energía.",
        price: 1.99,
        photo: "photo-1603833665858-e61d17a86224",
        category_id: "fruits",
        featured: false,
        sale_price: Some(1.49),
        stock: 200,
    },
    SeedProduct {
        name: "Tomates",
        description: "Tomates rojos y firmes, cultivados por agricultores locales.",
        price: 3.49,
        photo: "photo-1561136594-7f68413baa99",
        category_id: "vegetables",
        featured: true,
        sale_price: None,
        stock: 120,
    },
    SeedProduct {
        name: "Queso Fresco",
        description: "Queso fresco artesanal, ideal para ensaladas y platos tradicionales.",
        price: 5.99,
        photo: "photo-1486297678162-eb2a19b0a32d",
        category_id: "dairy",
        featured: false,
        sale_price: None,
        stock: 80,
    },
    SeedProduct {
        name: "Pollo Entero",
        description: "Pollo entero fresco, criado sin hormonas ni antibióticos.",
        price: 8.99,
        photo: "photo-1587593810167-a84920ea0781",
        category_id: "meats",
        featured: true,
        sale_price: Some(7.49),
        stock: 50,
    },
    SeedProduct {
        name: "Yogurt Natural",
        description: "Yogurt natural sin azúcar añadido, rico en probióticos.",
        price: 4.29,
        photo: "photo-1488477181946-6428a0291777",
        category_id: "dairy",
        featured: false,
        sale_price: None,
        stock: 90,
    },
    SeedProduct {
        name: "Papas",
        description: "Papas frescas y limpias, perfectas para freír, hornear o puré.",
        price: 3.29,
        photo: "photo-1518977676601-b53f82aba655",
        category_id: "vegetables",
        featured: false,
        sale_price: None,
        stock: 200,
    },
    SeedProduct {
        name: "Helado de Vainilla",
        description: "Cremoso helado de vainilla, hecho con ingredientes naturales.",
        price: 6.99,
        photo: "photo-1563805042-7684c019e1cb",
        category_id: "frozen",
        featured: false,
        sale_price: Some(5.99),
        stock: 40,
    },
    SeedProduct {
        name: "Arroz Premium",
        description: "Arroz de grano largo de alta calidad, perfecto para cualquier receta.",
        price: 7.49,
        photo: "photo-1586201375761-83865001e31c",
        category_id: "groceries",
        featured: true,
        sale_price: None,
        stock: 150,
    },
    SeedProduct {
        name: "Aceite de Oliva Extra Virgen",
        description: "Aceite de oliva de primera presión en frío, sabor excepcional.",
        price: 12.99,
        photo: "photo-1474979266404-7eaacbcd87c5",
        category_id: "groceries",
        featured: false,
        sale_price: None,
        stock: 75,
    },
    SeedProduct {
        name: "Uvas Verdes",
        description: "Uvas verdes sin semilla, dulces y refrescantes.",
        price: 4.99,
        photo: "photo-1515778767554-195d960ebcb6",
        category_id: "fruits",
        featured: false,
        sale_price: Some(3.99),
        stock: 60,
    },
    SeedProduct {
        name: "Pescado Congelado",
        description: "Filetes de pescado blanco congelados, listos para cocinar.",
        price: 9.99,
        photo: "photo-1519708227418-c8fd9a32b7a2",
        category_id: "frozen",
        featured: false,
        sale_price: None,
        stock: 45,
    },
];

pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .enumerate()
        .map(|(index, seed)| Product {
            id: (index + 1).to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: seed.price,
            image_url: format!(
                "https://images.unsplash.com/{}?q=80&w=400&auto=format&fit=crop",
                seed.photo
            ),
            category_id: seed.category_id.to_string(),
            featured: seed.featured,
            on_sale: seed.sale_price.is_some(),
            sale_price: seed.sale_price,
            stock: seed.stock,
        })
        .collect()
}

fn received_at(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

pub fn messages() -> Vec<Message> {
    vec![
        Message {
            id: "1".to_string(),
            name: "Juan Pérez".to_string(),
            email: "juan.perez@example.com".to_string(),
            phone: None,
            message: "Quisiera saber si tienen disponibilidad para entregar pedidos grandes en la zona norte de la ciudad.".to_string(),
            date: received_at(5, 10, 10, 30),
            read: true,
        },
        Message {
            id: "2".to_string(),
            name: "María González".to_string(),
            email: "maria.gonzalez@example.com".to_string(),
            phone: None,
            message: "Necesito información sobre sus precios mayoristas para restaurantes."
                .to_string(),
            date: received_at(5, 12, 14, 15),
            read: false,
        },
        Message {
            id: "3".to_string(),
            name: "Carlos Rodríguez".to_string(),
            email: "carlos.rodriguez@example.com".to_string(),
            phone: None,
            message: "¿Ofrecen algún descuento para pedidos recurrentes mensuales?".to_string(),
            date: received_at(5, 15, 9, 45),
            read: false,
        },
    ]
}

pub fn site_settings() -> SiteSettings {
    SiteSettings {
        company_name: "DistribuidoraRenata".to_string(),
        email: "info@distribuidorarenata.com".to_string(),
        phone: "+54 9 351 274-2582".to_string(),
        address: "Mariano Fragueiro 3746, Córdoba, Argentina".to_string(),
        schedule_weekdays: "8:30 - 13:00 y 17:00 - 20:00".to_string(),
        schedule_saturday: "8:30 - 13:00".to_string(),
        show_featured_products: true,
        show_sale_products: true,
        social_media: SocialMedia {
            facebook: String::new(),
            instagram: "https://www.instagram.com/renatadistribuidoracba".to_string(),
            twitter: String::new(),
        },
        site_description: "Distribuidora de alimentos de calidad para su negocio.".to_string(),
    }
}
